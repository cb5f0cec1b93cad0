// ── Mutation API ──
//
// Every write goes through the `Mutation` enum. Each variant declares the
// collections it makes stale; the controller reloads exactly those after
// the backend accepts the change.

pub mod requests;

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::model::Id;

pub use requests::{CreateLotRequest, RegisterRequest, UpdateLotRequest};

/// A controller-held collection that can be invalidated and refetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum Resource {
    AdminLots,
    UserLots,
    History,
}

/// All write operations against the backend.
#[derive(Debug, Clone)]
pub enum Mutation {
    // ── Admin ────────────────────────────────────────────────────────
    CreateLot(CreateLotRequest),
    UpdateLot { id: Id, update: UpdateLotRequest },
    DeleteLot { id: Id },

    // ── User ─────────────────────────────────────────────────────────
    Book { lot_id: Id },
    Release { reservation_id: Id },
    Export,

    // ── Anyone ───────────────────────────────────────────────────────
    Register(RegisterRequest),
}

impl Mutation {
    /// Collections made stale once this mutation succeeds, in reload order.
    pub fn invalidates(&self) -> &'static [Resource] {
        match self {
            Self::CreateLot(_) | Self::UpdateLot { .. } | Self::DeleteLot { .. } => {
                &[Resource::AdminLots]
            }
            Self::Book { .. } | Self::Release { .. } => &[Resource::UserLots, Resource::History],
            Self::Export | Self::Register(_) => &[],
        }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateLot(_) => "create-lot",
            Self::UpdateLot { .. } => "update-lot",
            Self::DeleteLot { .. } => "delete-lot",
            Self::Book { .. } => "book",
            Self::Release { .. } => "release",
            Self::Export => "export",
            Self::Register(_) => "register",
        }
    }
}

/// One-line confirmation published after a successful mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    LotCreated {
        id: Option<Id>,
        name: String,
    },
    LotUpdated {
        id: Id,
    },
    LotDeleted {
        id: Id,
    },
    Booked {
        spot_id: Id,
        reservation_id: Option<Id>,
    },
    Released {
        reservation_id: Id,
        cost: Option<f64>,
        /// Backend message, kept when no cost came back (already released).
        message: Option<String>,
    },
    ExportStarted {
        task_id: Id,
    },
    Registered,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LotCreated { id: Some(id), name } => write!(f, "Created lot {name} ({id})"),
            Self::LotCreated { id: None, name } => write!(f, "Created lot {name}"),
            Self::LotUpdated { id } => write!(f, "Updated lot {id}"),
            Self::LotDeleted { id } => write!(f, "Deleted lot {id}"),
            Self::Booked {
                spot_id,
                reservation_id: Some(reservation_id),
            } => write!(f, "Booked spot {spot_id} (reservation {reservation_id})"),
            Self::Booked { spot_id, .. } => write!(f, "Booked spot {spot_id}"),
            Self::Released {
                cost: Some(cost), ..
            } => write!(f, "Released, cost {cost}"),
            Self::Released {
                reservation_id,
                message,
                ..
            } => match message {
                Some(message) => write!(f, "{message} (reservation {reservation_id})"),
                None => write!(f, "Released reservation {reservation_id}"),
            },
            Self::ExportStarted { task_id } => write!(f, "Export started: {task_id}"),
            Self::Registered => f.write_str("Registered! Now log in."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn lot_mutations_invalidate_admin_lots_only() {
        let delete = Mutation::DeleteLot { id: Id::Number(1) };
        let update = Mutation::UpdateLot {
            id: Id::Number(1),
            update: UpdateLotRequest::default(),
        };
        assert_eq!(delete.invalidates(), &[Resource::AdminLots]);
        assert_eq!(update.invalidates(), &[Resource::AdminLots]);
    }

    #[test]
    fn booking_invalidates_lots_then_history() {
        let book = Mutation::Book {
            lot_id: Id::from("L1"),
        };
        let release = Mutation::Release {
            reservation_id: Id::from("R7"),
        };
        assert_eq!(book.invalidates(), &[Resource::UserLots, Resource::History]);
        assert_eq!(release.invalidates(), book.invalidates());
    }

    #[test]
    fn export_and_register_invalidate_nothing() {
        assert!(Mutation::Export.invalidates().is_empty());
        let register = Mutation::Register(RegisterRequest {
            name: "Ravi".into(),
            email: "ravi@example.com".into(),
            password: "pw".to_string().into(),
        });
        assert!(register.invalidates().is_empty());
    }

    #[test]
    fn notices_read_naturally() {
        let booked = Notice::Booked {
            spot_id: Id::from("S3"),
            reservation_id: None,
        };
        let released = Notice::Released {
            reservation_id: Id::from("R7"),
            cost: Some(42.0),
            message: None,
        };
        let again = Notice::Released {
            reservation_id: Id::from("R7"),
            cost: None,
            message: Some("Already released".into()),
        };
        assert_eq!(booked.to_string(), "Booked spot S3");
        assert_eq!(released.to_string(), "Released, cost 42");
        assert_eq!(again.to_string(), "Already released (reservation R7)");
    }

    #[test]
    fn resource_names_are_kebab_case() {
        let names: Vec<String> = Resource::iter().map(|r| r.to_string()).collect();
        assert_eq!(names, vec!["admin-lots", "user-lots", "history"]);
    }
}
