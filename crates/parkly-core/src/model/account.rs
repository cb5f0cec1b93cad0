// ── Registered account (admin listing) ──

use serde::{Deserialize, Serialize};

use super::Id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: Id,
    pub name: String,
    pub email: String,
}
