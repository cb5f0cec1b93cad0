// ── Session state holder ──
//
// Everything a page can show: the current identity, the loaded lots and
// history, the last notice and the last error. Only the controller writes
// here; pages read snapshots or subscribe.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use super::collection::EntityCollection;
use crate::command::Notice;
use crate::model::{Id, Identity, Lot, Reservation};
use crate::stream::{EntityStream, ReservationFilter, Snapshot};

/// Reactive store for one client session.
///
/// Lots hold whichever listing the identity's role loads (admin or user);
/// history is only populated for users.
pub struct SessionStore {
    identity: watch::Sender<Identity>,
    lots: EntityCollection<Lot>,
    history: EntityCollection<Reservation>,
    notice: watch::Sender<Option<Notice>>,
    error: watch::Sender<Option<String>>,
    last_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (identity, _) = watch::channel(Identity::anonymous());
        let (notice, _) = watch::channel(None);
        let (error, _) = watch::channel(None);
        let (last_refresh, _) = watch::channel(None);

        Self {
            identity,
            lots: EntityCollection::new(),
            history: EntityCollection::new(),
            notice,
            error,
            last_refresh,
        }
    }

    // ── Identity ─────────────────────────────────────────────────────

    pub fn identity(&self) -> Identity {
        self.identity.borrow().clone()
    }

    pub fn subscribe_identity(&self) -> watch::Receiver<Identity> {
        self.identity.subscribe()
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn lots_snapshot(&self) -> Snapshot<Lot> {
        self.lots.snapshot()
    }

    pub fn history_snapshot(&self) -> Snapshot<Reservation> {
        self.history.snapshot()
    }

    pub fn lot_by_id(&self, id: &Id) -> Option<Arc<Lot>> {
        self.lots.get(id)
    }

    pub fn reservation_by_id(&self, id: &Id) -> Option<Arc<Reservation>> {
        self.history.get(id)
    }

    /// Reservations without a leaving time, in history order.
    pub fn active_reservations(&self) -> Vec<Arc<Reservation>> {
        self.subscribe_history().matching(&ReservationFilter::Active)
    }

    pub fn lot_count(&self) -> usize {
        self.lots.len()
    }

    pub fn history_count(&self) -> usize {
        self.history.len()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_lots(&self) -> EntityStream<Lot> {
        EntityStream::new(self.lots.subscribe())
    }

    pub fn subscribe_history(&self) -> EntityStream<Reservation> {
        EntityStream::new(self.history.subscribe())
    }

    // ── Notices and errors ───────────────────────────────────────────

    /// The confirmation published by the last successful mutation.
    pub fn notice(&self) -> Option<Notice> {
        self.notice.borrow().clone()
    }

    pub fn subscribe_notice(&self) -> watch::Receiver<Option<Notice>> {
        self.notice.subscribe()
    }

    /// Message of the last failed operation; cleared by the next success.
    pub fn error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub fn subscribe_error(&self) -> watch::Receiver<Option<String>> {
        self.error.subscribe()
    }

    /// When any collection was last reloaded from the backend.
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.borrow()
    }

    // ── Writes (controller only) ─────────────────────────────────────

    pub(crate) fn set_identity(&self, identity: Identity) {
        self.identity.send_replace(identity);
    }

    pub(crate) fn replace_lots(&self, lots: Vec<Lot>) {
        self.lots
            .replace_all(lots.into_iter().map(|l| (l.id.clone(), l)).collect());
        self.mark_refreshed();
    }

    pub(crate) fn replace_history(&self, history: Vec<Reservation>) {
        self.history
            .replace_all(history.into_iter().map(|r| (r.id.clone(), r)).collect());
        self.mark_refreshed();
    }

    pub(crate) fn clear_history(&self) {
        self.history.clear();
    }

    /// Drop loaded lots and history, keeping identity and messages.
    pub(crate) fn clear_collections(&self) {
        self.lots.clear();
        self.history.clear();
    }

    pub(crate) fn publish_notice(&self, notice: Notice) {
        self.notice.send_replace(Some(notice));
    }

    pub(crate) fn publish_error(&self, message: String) {
        self.error.send_replace(Some(message));
    }

    pub(crate) fn clear_error(&self) {
        self.error.send_if_modified(|current| current.take().is_some());
    }

    /// Back to the unauthenticated, empty state.
    pub(crate) fn reset(&self) {
        self.set_identity(Identity::anonymous());
        self.clear_collections();
        self.notice.send_replace(None);
        self.error.send_replace(None);
        self.last_refresh.send_replace(None);
    }

    fn mark_refreshed(&self) {
        self.last_refresh.send_replace(Some(Utc::now()));
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    fn lot(id: u64, name: &str) -> Lot {
        Lot {
            id: Id::Number(id),
            name: name.into(),
            address: String::new(),
            pin_code: String::new(),
            price: 10.0,
            total_spots: Some(4),
            occupied_spots: Some(0),
            available_spots: None,
        }
    }

    fn reservation(id: &str, to: Option<&str>) -> Reservation {
        Reservation {
            id: Id::from(id),
            spot_id: None,
            lot: Some("Central".into()),
            from: Some("2025-01-01T09:00:00".into()),
            to: to.map(Into::into),
            cost: None,
        }
    }

    #[test]
    fn reset_clears_everything() {
        let store = SessionStore::new();
        store.set_identity(Identity {
            role: Some(Role::User),
            name: Some("Asha".into()),
            email: None,
        });
        store.replace_lots(vec![lot(1, "Central")]);
        store.replace_history(vec![reservation("R1", None)]);
        store.publish_notice(Notice::Registered);
        store.publish_error("boom".into());

        store.reset();

        assert!(!store.identity().is_authenticated());
        assert!(store.lots_snapshot().is_empty());
        assert!(store.history_snapshot().is_empty());
        assert!(store.notice().is_none());
        assert!(store.error().is_none());
        assert!(store.last_refresh().is_none());
    }

    #[test]
    fn active_reservations_filters_completed() {
        let store = SessionStore::new();
        store.replace_history(vec![
            reservation("R2", None),
            reservation("R1", Some("2025-01-01T10:00:00")),
        ]);

        let active = store.active_reservations();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, Id::from("R2"));
        assert!(store.last_refresh().is_some());
    }

    #[test]
    fn clear_error_only_notifies_when_set() {
        let store = SessionStore::new();
        let mut rx = store.subscribe_error();

        store.clear_error();
        assert!(!rx.has_changed().unwrap_or(true));

        store.publish_error("No spots available".into());
        assert_eq!(rx.borrow_and_update().as_deref(), Some("No spots available"));

        store.clear_error();
        assert!(rx.has_changed().unwrap_or(false));
        assert!(store.error().is_none());
    }
}
