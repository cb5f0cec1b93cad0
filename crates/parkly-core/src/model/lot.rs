// ── Lot and spot domain types ──

use serde::{Deserialize, Serialize};
use strum::Display;

use super::Id;

/// A parking location.
///
/// Counts the backend did not send stay `None`: the admin listing carries
/// `occupied`, the user listing carries `available`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    pub id: Id,
    pub name: String,
    pub address: String,
    pub pin_code: String,
    /// Price per hour.
    pub price: f64,
    pub total_spots: Option<u32>,
    pub occupied_spots: Option<u32>,
    pub available_spots: Option<u32>,
}

impl Lot {
    /// Free spots, derived from the total and occupied counts when the
    /// backend did not report them directly.
    pub fn free_spots(&self) -> Option<u32> {
        self.available_spots.or_else(|| {
            let total = self.total_spots?;
            let occupied = self.occupied_spots?;
            Some(total.saturating_sub(occupied))
        })
    }

    pub fn is_full(&self) -> bool {
        self.free_spots() == Some(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum SpotStatus {
    Available,
    Occupied,
    Unknown,
}

impl SpotStatus {
    /// Decode the backend's one-letter status (`A` / `O`).
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "A" | "a" => Self::Available,
            "O" | "o" => Self::Occupied,
            _ => Self::Unknown,
        }
    }
}

/// One spot of a lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    pub id: Id,
    pub status: SpotStatus,
}

/// Occupancy of one lot (admin summary row).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotOccupancy {
    pub lot: String,
    pub total: u32,
    pub occupied: u32,
}

impl LotOccupancy {
    pub fn free(&self) -> u32 {
        self.total.saturating_sub(self.occupied)
    }

    /// Occupied share in percent, `0` for an empty lot.
    pub fn occupancy_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.occupied) * 100.0 / f64::from(self.total)
    }
}
