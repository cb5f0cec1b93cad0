// ── Filter predicates for entity streams ──
//
// Used by pages to narrow snapshots without re-querying the backend.

use crate::model::{Lot, Reservation};

/// Filter predicate for lot collections.
pub enum LotFilter {
    All,
    /// Case-insensitive match on name or address, substring match on the
    /// pin code. An empty query matches everything.
    Search(String),
    /// Lots with at least one free spot.
    Available,
    Custom(Box<dyn Fn(&Lot) -> bool + Send + Sync>),
}

impl LotFilter {
    /// Search filter for a raw user query.
    pub fn search(query: &str) -> Self {
        Self::Search(query.trim().to_lowercase())
    }

    pub fn matches(&self, lot: &Lot) -> bool {
        match self {
            Self::All => true,
            Self::Search(query) => {
                query.is_empty()
                    || lot.name.to_lowercase().contains(query.as_str())
                    || lot.address.to_lowercase().contains(query.as_str())
                    || lot.pin_code.contains(query.as_str())
            }
            Self::Available => lot.free_spots().is_none_or(|free| free > 0),
            Self::Custom(f) => f(lot),
        }
    }
}

/// Filter predicate for reservation history.
pub enum ReservationFilter {
    All,
    Active,
    Completed,
}

impl ReservationFilter {
    pub fn matches(&self, reservation: &Reservation) -> bool {
        match self {
            Self::All => true,
            Self::Active => reservation.is_active(),
            Self::Completed => !reservation.is_active(),
        }
    }
}
