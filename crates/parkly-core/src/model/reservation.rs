// ── Reservation (history entry) domain types ──

use chrono::{DateTime, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use strum::Display;

use super::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum ReservationStatus {
    Active,
    Completed,
}

/// A booked spot. Active until the backend records a leaving time.
///
/// Timestamps are kept as the backend sent them (ISO 8601); use
/// [`started_at`](Self::started_at) / [`ended_at`](Self::ended_at) for
/// parsed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Id,
    pub spot_id: Option<Id>,
    pub lot: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub cost: Option<f64>,
}

impl Reservation {
    pub fn status(&self) -> ReservationStatus {
        if self.to.is_some() {
            ReservationStatus::Completed
        } else {
            ReservationStatus::Active
        }
    }

    pub fn is_active(&self) -> bool {
        self.status() == ReservationStatus::Active
    }

    pub fn started_at(&self) -> Option<NaiveDateTime> {
        self.from.as_deref().and_then(parse_timestamp)
    }

    pub fn ended_at(&self) -> Option<NaiveDateTime> {
        self.to.as_deref().and_then(parse_timestamp)
    }

    /// Parked time of a completed reservation.
    pub fn duration(&self) -> Option<TimeDelta> {
        Some(self.ended_at()? - self.started_at()?)
    }
}

/// Accepts naive ISO timestamps (with or without fraction) and RFC 3339.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc()))
}

/// Per-user totals shown by the summary page, computed from history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub reservations: usize,
    pub active: usize,
    pub completed: usize,
    pub total_spent: f64,
    /// Lot the user parked at most often.
    pub favourite_lot: Option<String>,
}

impl HistorySummary {
    pub fn from_history<'a>(history: impl IntoIterator<Item = &'a Reservation>) -> Self {
        let mut summary = Self::default();
        let mut visits: Vec<(&str, usize)> = Vec::new();

        for reservation in history {
            summary.reservations += 1;
            match reservation.status() {
                ReservationStatus::Active => summary.active += 1,
                ReservationStatus::Completed => {
                    summary.completed += 1;
                    summary.total_spent += reservation.cost.unwrap_or_default();
                }
            }
            if let Some(lot) = reservation.lot.as_deref() {
                match visits.iter_mut().find(|(name, _)| *name == lot) {
                    Some((_, count)) => *count += 1,
                    None => visits.push((lot, 1)),
                }
            }
        }

        // First lot wins ties, so the most recent favourite is kept.
        let mut best: Option<(&str, usize)> = None;
        for (name, count) in visits {
            if best.is_none_or(|(_, top)| count > top) {
                best = Some((name, count));
            }
        }
        summary.favourite_lot = best.map(|(name, _)| name.to_owned());
        summary
    }
}
