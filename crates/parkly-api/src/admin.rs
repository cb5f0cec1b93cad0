// Admin endpoints
//
// Lot management plus the read-only user, spot and occupancy listings.
// The backend answers 403 `{"error": "Admin required"}` for other roles.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{
    AdminLot, Id, LotCreated, LotOccupancy, LotUpdate, Message, NewLot, SpotRecord, UserRecord,
};

impl ApiClient {
    /// List every lot with its occupancy.
    ///
    /// `GET /admin/lots`
    pub async fn admin_lots(&self) -> Result<Vec<AdminLot>, Error> {
        self.get("/admin/lots").await
    }

    /// Create a lot; the backend creates its spots.
    ///
    /// `POST /admin/lots`
    pub async fn create_lot(&self, lot: &NewLot) -> Result<LotCreated, Error> {
        debug!(name = %lot.prime_location_name, spots = lot.number_of_spots, "creating lot");
        self.post("/admin/lots", lot).await
    }

    /// Change some fields of a lot. An empty reply body counts as success.
    ///
    /// `PUT /admin/lots/{id}`
    pub async fn update_lot(&self, id: &Id, update: &LotUpdate) -> Result<Message, Error> {
        debug!(%id, "updating lot");
        self.put::<Option<Message>>(&format!("/admin/lots/{id}"), update)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Delete a lot. Rejected while any of its spots is occupied.
    ///
    /// `DELETE /admin/lots/{id}`
    pub async fn delete_lot(&self, id: &Id) -> Result<Message, Error> {
        debug!(%id, "deleting lot");
        self.delete::<Option<Message>>(&format!("/admin/lots/{id}"))
            .await
            .map(Option::unwrap_or_default)
    }

    /// `GET /admin/users`
    pub async fn admin_users(&self) -> Result<Vec<UserRecord>, Error> {
        self.get("/admin/users").await
    }

    /// `GET /admin/spots/{lot_id}`
    pub async fn lot_spots(&self, lot_id: &Id) -> Result<Vec<SpotRecord>, Error> {
        self.get(&format!("/admin/spots/{lot_id}")).await
    }

    /// Total and occupied spots per lot.
    ///
    /// `GET /admin/summary`
    pub async fn admin_summary(&self) -> Result<Vec<LotOccupancy>, Error> {
        self.get("/admin/summary").await
    }
}
