// ── API-to-domain type conversions ──
//
// Bridges raw `parkly_api` response types into canonical
// `parkly_core::model` types. The admin and user lot listings spell their
// fields differently; both end up as the same `Lot`.

use parkly_api::models::{
    AdminLot, HistoryEntry, LotOccupancy as ApiLotOccupancy, Me, Role as ApiRole, SpotRecord,
    UserLot, UserRecord,
};
use tracing::debug;

use crate::model::{Identity, Lot, LotOccupancy, Reservation, Role, Spot, SpotStatus, UserAccount};

// ── Identity ───────────────────────────────────────────────────────

fn role(raw: Option<ApiRole>) -> Option<Role> {
    match raw? {
        ApiRole::Admin => Some(Role::Admin),
        ApiRole::User => Some(Role::User),
        ApiRole::Other => {
            debug!("backend reported an unknown role, treating session as anonymous");
            None
        }
    }
}

impl From<Me> for Identity {
    fn from(me: Me) -> Self {
        if me.authenticated == Some(false) {
            return Identity::anonymous();
        }
        Identity {
            role: role(me.role),
            name: me.name,
            email: me.email,
        }
    }
}

// ── Lots ───────────────────────────────────────────────────────────

impl From<AdminLot> for Lot {
    fn from(lot: AdminLot) -> Self {
        Lot {
            id: lot.id,
            name: lot.prime_location_name,
            address: lot.address,
            pin_code: lot.pin_code,
            price: lot.price,
            total_spots: Some(lot.number_of_spots),
            occupied_spots: lot.occupied,
            available_spots: lot.available,
        }
    }
}

impl From<UserLot> for Lot {
    fn from(lot: UserLot) -> Self {
        let occupied = match (lot.total, lot.available) {
            (Some(total), Some(available)) => Some(total.saturating_sub(available)),
            _ => None,
        };
        Lot {
            id: lot.id,
            name: lot.name,
            address: lot.address,
            pin_code: lot.pin_code,
            price: lot.price,
            total_spots: lot.total,
            occupied_spots: occupied,
            available_spots: lot.available,
        }
    }
}

impl From<SpotRecord> for Spot {
    fn from(spot: SpotRecord) -> Self {
        Spot {
            id: spot.id,
            status: SpotStatus::from_code(&spot.status),
        }
    }
}

impl From<ApiLotOccupancy> for LotOccupancy {
    fn from(row: ApiLotOccupancy) -> Self {
        LotOccupancy {
            lot: row.lot,
            total: row.total,
            occupied: row.occupied,
        }
    }
}

// ── Accounts and reservations ──────────────────────────────────────

impl From<UserRecord> for UserAccount {
    fn from(user: UserRecord) -> Self {
        UserAccount {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

impl From<HistoryEntry> for Reservation {
    fn from(entry: HistoryEntry) -> Self {
        Reservation {
            id: entry.id,
            spot_id: entry.spot_id,
            lot: entry.lot,
            from: entry.from,
            to: entry.to,
            cost: entry.cost,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use parkly_api::Id;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn anonymous_me_has_no_role() {
        let me: Me = serde_json::from_value(json!({"authenticated": false})).unwrap();
        assert_eq!(Identity::from(me), Identity::anonymous());
    }

    #[test]
    fn unknown_role_is_anonymous() {
        let me: Me = serde_json::from_value(json!({"role": "auditor", "name": "Zed"})).unwrap();
        let identity = Identity::from(me);
        assert!(!identity.is_authenticated());
        assert_eq!(identity.name.as_deref(), Some("Zed"));
    }

    #[test]
    fn admin_and_user_listings_normalize_to_same_lot() {
        let admin: AdminLot = serde_json::from_value(json!({
            "id": 1, "prime_location_name": "Central", "address": "MG Road",
            "pin_code": "560001", "price": 50, "number_of_spots": 10, "occupied": 4
        }))
        .unwrap();
        let user: UserLot = serde_json::from_value(json!({
            "id": 1, "name": "Central", "address": "MG Road",
            "pin_code": "560001", "price": 50, "available": 6, "total": 10
        }))
        .unwrap();

        let from_admin = Lot::from(admin);
        let from_user = Lot::from(user);

        assert_eq!(from_admin.id, Id::Number(1));
        assert_eq!(from_admin.name, from_user.name);
        assert_eq!(from_admin.total_spots, from_user.total_spots);
        assert_eq!(from_admin.occupied_spots, from_user.occupied_spots);
        assert_eq!(from_admin.free_spots(), Some(6));
        assert_eq!(from_user.free_spots(), Some(6));
    }

    #[test]
    fn history_entry_keeps_open_end() {
        let entry: HistoryEntry = serde_json::from_value(json!({
            "id": "R7", "spot_id": "S3", "lot": "Central",
            "from": "2025-01-01T09:00:00", "to": null, "cost": 0
        }))
        .unwrap();
        let reservation = Reservation::from(entry);
        assert!(reservation.is_active());
        assert_eq!(reservation.id, Id::from("R7"));
    }
}
