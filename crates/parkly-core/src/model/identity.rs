// ── Identity domain type ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Role of the signed-in account.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// Who the current session belongs to.
///
/// `role == None` means unauthenticated. Re-fetched from the backend on
/// every start and after login; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub role: Option<Role>,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Identity {
    /// The unauthenticated identity.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.role.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }

    pub fn is_user(&self) -> bool {
        self.role == Some(Role::User)
    }

    /// Name for greetings: the name, else the email, else `"guest"`.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("guest")
    }
}
