// parkly-api: async Rust client for the parkly parking reservation API

pub mod admin;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod transport;
pub mod user;

pub use auth::Registration;
pub use client::{ApiClient, RequestOptions};
pub use error::Error;
pub use models::{
    AdminLot, Booking, ExportTask, HistoryEntry, Id, LoginResponse, LotCreated, LotOccupancy,
    LotUpdate, Me, Message, NewLot, Release, Role, SpotRecord, UserLot, UserRecord,
};
pub use transport::{TlsMode, TransportConfig};
