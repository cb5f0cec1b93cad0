//! Session state, reload sequencing and page routing between `parkly-api`
//! and the `parkly` command-line client.
//!
//! - **[`Controller`]**: central facade. Holds the API client and the
//!   [`SessionStore`]; [`initialize()`](Controller::initialize) fetches the
//!   identity and loads what its role sees, and every mutation is followed
//!   by a reload of the collections it invalidates.
//!
//! - **[`SessionStore`]**: reactive storage built on `EntityCollection<T>`
//!   (`DashMap` + `tokio::sync::watch` channels) for the identity, lots,
//!   history, the last notice and the last error.
//!
//! - **[`EntityStream<T>`]**: subscription handle vended by the store.
//!   Exposes `current()` / `latest()` / `changed()`, and `matching()`
//!   with a [`LotFilter`] or [`ReservationFilter`].
//!
//! - **[`Mutation`]**: typed write requests. [`Mutation::invalidates`]
//!   names the [`Resource`]s to refetch afterwards.
//!
//! - **[`Router`]**: maps URL paths to lazily built views; unknown paths
//!   yield [`Navigation::NotFound`].

pub mod command;
pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod model;
pub mod router;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::requests::*;
pub use command::{Mutation, Notice, Resource};
pub use config::{ClientConfig, TlsVerification};
pub use controller::Controller;
pub use error::CoreError;
pub use router::{Audience, Navigation, Route, Router};
pub use store::SessionStore;
pub use stream::{EntityStream, EntityWatchStream, LotFilter, ReservationFilter, Snapshot};

pub use model::{
    HistorySummary, Id, Identity, Lot, LotOccupancy, Reservation, ReservationStatus, Role, Spot,
    SpotStatus, UserAccount,
};
