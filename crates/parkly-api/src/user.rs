// User endpoints
//
// Lot availability, booking, release, history and CSV export.

use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Booking, ExportTask, HistoryEntry, Id, Release, UserLot};

impl ApiClient {
    /// List lots with the number of free spots.
    ///
    /// `GET /user/lots`
    pub async fn user_lots(&self) -> Result<Vec<UserLot>, Error> {
        self.get("/user/lots").await
    }

    /// Book the first free spot of a lot.
    ///
    /// `POST /user/book` with `{"lot_id": ...}`
    pub async fn book(&self, lot_id: &Id) -> Result<Booking, Error> {
        debug!(%lot_id, "booking spot");
        self.post("/user/book", &json!({ "lot_id": lot_id })).await
    }

    /// Close a reservation; the backend computes the cost.
    ///
    /// `POST /user/release` with `{"reservation_id": ...}`
    pub async fn release(&self, reservation_id: &Id) -> Result<Release, Error> {
        debug!(%reservation_id, "releasing reservation");
        self.post("/user/release", &json!({ "reservation_id": reservation_id }))
            .await
    }

    /// Reservations of the current user, newest first.
    ///
    /// `GET /user/history`
    pub async fn history(&self) -> Result<Vec<HistoryEntry>, Error> {
        self.get("/user/history").await
    }

    /// Start a background CSV export of the user's reservations.
    ///
    /// `POST /user/export`. Only the task id comes back; the file is
    /// produced out-of-band.
    pub async fn export_csv(&self) -> Result<ExportTask, Error> {
        debug!("requesting CSV export");
        self.post_empty("/user/export").await
    }
}
