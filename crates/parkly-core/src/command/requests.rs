// ── Typed request structs for Mutation payloads ──

use parkly_api::{LotUpdate, NewLot, Registration};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

// ── Lots ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateLotRequest {
    pub name: String,
    pub address: String,
    pub pin_code: String,
    /// Price per hour.
    pub price: f64,
    pub number_of_spots: u32,
}

impl From<CreateLotRequest> for NewLot {
    fn from(req: CreateLotRequest) -> Self {
        NewLot {
            prime_location_name: req.name,
            address: req.address,
            pin_code: req.pin_code,
            price: req.price,
            number_of_spots: req.number_of_spots,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateLotRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_spots: Option<u32>,
}

impl UpdateLotRequest {
    /// `true` when no field would change.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<UpdateLotRequest> for LotUpdate {
    fn from(req: UpdateLotRequest) -> Self {
        LotUpdate {
            prime_location_name: req.name,
            address: req.address,
            pin_code: req.pin_code,
            price: req.price,
            number_of_spots: req.number_of_spots,
        }
    }
}

// ── Accounts ───────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Registration {
            name: req.name,
            email: req.email,
            password: req.password,
        }
    }
}
