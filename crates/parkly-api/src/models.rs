// Wire types for the parkly REST API
//
// These mirror the JSON the backend sends and expects. Field names follow
// the backend; aliases cover the alternate spellings some deployments use
// (`price_per_hour`, `available_spots`, ...). `parkly-core` converts them
// into its domain model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

// ── Identifiers ─────────────────────────────────────────────────────

/// Opaque backend identifier. The backend uses integers; some
/// deployments hand out strings (task ids are always strings).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Number(u64),
    Text(String),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for Id {
    type Err = std::convert::Infallible;

    /// Numeric strings become [`Id::Number`] so they serialize as JSON numbers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<u64>()
            .map_or_else(|_| Self::Text(s.to_owned()), Self::Number))
    }
}

impl From<u64> for Id {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

// ── Auth ────────────────────────────────────────────────────────────

/// Account role as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
    #[serde(other)]
    Other,
}

/// `GET /auth/me` response.
///
/// Authenticated: `{name, email, role}`. Otherwise `{"authenticated": false}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Me {
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub authenticated: Option<bool>,
}

/// `POST /auth/login` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Acknowledgement body used by logout, register, update and delete.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub message: Option<String>,
}

// ── Lots ────────────────────────────────────────────────────────────

/// Lot as listed by `GET /admin/lots`.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminLot {
    pub id: Id,
    pub prime_location_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub pin_code: String,
    #[serde(default, alias = "price_per_hour")]
    pub price: f64,
    #[serde(default)]
    pub number_of_spots: u32,
    #[serde(default, alias = "occupied_spots")]
    pub occupied: Option<u32>,
    #[serde(default, alias = "available_spots")]
    pub available: Option<u32>,
}

/// Lot as listed by `GET /user/lots`, with availability.
#[derive(Debug, Clone, Deserialize)]
pub struct UserLot {
    pub id: Id,
    #[serde(alias = "prime_location_name")]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub pin_code: String,
    #[serde(default, alias = "price_per_hour")]
    pub price: f64,
    #[serde(default, alias = "available_spots")]
    pub available: Option<u32>,
    #[serde(default, alias = "number_of_spots")]
    pub total: Option<u32>,
}

/// Body of `POST /admin/lots`: every lot field except `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLot {
    pub prime_location_name: String,
    pub address: String,
    pub pin_code: String,
    pub price: f64,
    pub number_of_spots: u32,
}

/// Body of `PUT /admin/lots/{id}`: only the fields being changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LotUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prime_location_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_spots: Option<u32>,
}

/// `POST /admin/lots` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LotCreated {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, alias = "lot_id")]
    pub id: Option<Id>,
}

/// One spot of a lot, `status` is `"A"` (available) or `"O"` (occupied).
#[derive(Debug, Clone, Deserialize)]
pub struct SpotRecord {
    pub id: Id,
    pub status: String,
}

/// Row of `GET /admin/summary`.
#[derive(Debug, Clone, Deserialize)]
pub struct LotOccupancy {
    pub lot: String,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub occupied: u32,
}

/// Row of `GET /admin/users`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub id: Id,
    #[serde(alias = "username")]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

// ── Reservations ────────────────────────────────────────────────────

/// `POST /user/book` response.
#[derive(Debug, Clone, Deserialize)]
pub struct Booking {
    pub spot_id: Id,
    #[serde(default)]
    pub reservation_id: Option<Id>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `POST /user/release` response. Releasing twice answers with only a
/// message and no cost.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Row of `GET /user/history`. `to` is null while the reservation is active.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    pub id: Id,
    #[serde(default)]
    pub spot_id: Option<Id>,
    #[serde(default, alias = "lot_name")]
    pub lot: Option<String>,
    #[serde(default, alias = "parking_timestamp")]
    pub from: Option<String>,
    #[serde(default, alias = "leaving_timestamp")]
    pub to: Option<String>,
    #[serde(default, alias = "parking_cost")]
    pub cost: Option<f64>,
}

/// `POST /user/export` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportTask {
    pub task_id: Id,
    #[serde(default)]
    pub message: Option<String>,
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Accept `"560001"` and `560001` alike.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
        Null,
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
        Raw::Null => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_accepts_numbers_and_strings() {
        let n: Id = serde_json::from_value(json!(7)).expect("number id");
        let s: Id = serde_json::from_value(json!("S3")).expect("string id");
        assert_eq!(n, Id::Number(7));
        assert_eq!(s, Id::Text("S3".into()));
        assert_eq!("12".parse::<Id>().expect("infallible"), Id::Number(12));
        assert_eq!(serde_json::to_value(Id::Number(12)).expect("serialize"), json!(12));
    }

    #[test]
    fn me_unauthenticated_has_no_role() {
        let me: Me = serde_json::from_value(json!({"authenticated": false})).expect("me");
        assert!(me.role.is_none());
        assert_eq!(me.authenticated, Some(false));
    }

    #[test]
    fn unknown_role_maps_to_other() {
        let me: Me = serde_json::from_value(json!({"role": "auditor"})).expect("me");
        assert_eq!(me.role, Some(Role::Other));
    }

    #[test]
    fn user_lot_reads_both_spellings() {
        let lot: UserLot = serde_json::from_value(json!({
            "id": 1, "name": "Central", "price": 50, "address": "MG Road",
            "pin_code": 560001, "available": 3, "total": 10
        }))
        .expect("user lot");
        assert_eq!(lot.name, "Central");
        assert_eq!(lot.pin_code, "560001");
        assert_eq!(lot.available, Some(3));

        let alt: UserLot = serde_json::from_value(json!({
            "id": 2, "prime_location_name": "East", "price_per_hour": 20.5,
            "available_spots": 0
        }))
        .expect("alternate user lot");
        assert_eq!(alt.name, "East");
        assert!((alt.price - 20.5).abs() < f64::EPSILON);
        assert_eq!(alt.total, None);
    }

    #[test]
    fn lot_update_skips_unset_fields() {
        let update = LotUpdate {
            price: Some(80.0),
            ..LotUpdate::default()
        };
        assert_eq!(
            serde_json::to_value(&update).expect("serialize"),
            json!({"price": 80.0})
        );
    }
}
