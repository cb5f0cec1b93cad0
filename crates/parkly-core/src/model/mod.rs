// ── Domain model ──
//
// Canonical client-side representations of backend entities. The admin
// and user listings of a lot use different field names; both normalize
// into one `Lot` here (see `crate::convert`).

pub mod account;
pub mod identity;
pub mod lot;
pub mod reservation;

// ── Re-exports ──────────────────────────────────────────────────────

pub use parkly_api::Id;

pub use account::UserAccount;
pub use identity::{Identity, Role};
pub use lot::{Lot, LotOccupancy, Spot, SpotStatus};
pub use reservation::{HistorySummary, Reservation, ReservationStatus};
