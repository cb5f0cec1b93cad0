// ── Generic reactive entity collection ──
//
// Concurrent storage with O(1) lookups by id and push-based change
// notification via `watch` channels. Snapshots keep the order the backend
// listed the entities in.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::watch;

use crate::model::Id;
use crate::stream::Snapshot;

/// A reactive collection for a single entity type.
///
/// Uses `DashMap` for O(1) concurrent lookups and a `watch` channel for
/// push-based change notification. Every mutation publishes a fresh
/// snapshot to subscribers.
pub(crate) struct EntityCollection<T: Send + Sync + 'static> {
    /// Primary storage: backend id -> entity.
    by_id: DashMap<Id, Arc<T>>,

    /// Ordered snapshot, rebuilt on mutation for efficient subscription.
    snapshot: watch::Sender<Snapshot<T>>,
}

impl<T: Send + Sync + 'static> EntityCollection<T> {
    pub(crate) fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            by_id: DashMap::new(),
            snapshot,
        }
    }

    /// Replace the whole collection with a fresh listing.
    ///
    /// Entities missing from `entries` are dropped; the snapshot follows
    /// the order of `entries`. A duplicate id keeps its last entity.
    pub(crate) fn replace_all(&self, entries: Vec<(Id, T)>) {
        let mut ordered: Vec<(Id, Arc<T>)> = Vec::with_capacity(entries.len());
        for (id, entity) in entries {
            let entity = Arc::new(entity);
            match ordered.iter_mut().find(|(existing, _)| *existing == id) {
                Some(slot) => slot.1 = entity,
                None => ordered.push((id, entity)),
            }
        }

        self.by_id.retain(|id, _| ordered.iter().any(|(keep, _)| keep == id));
        for (id, entity) in &ordered {
            self.by_id.insert(id.clone(), Arc::clone(entity));
        }

        let values = ordered.into_iter().map(|(_, entity)| entity).collect();
        self.publish(values);
    }

    /// Look up an entity by its backend id.
    pub(crate) fn get(&self, id: &Id) -> Option<Arc<T>> {
        self.by_id.get(id).map(|r| Arc::clone(r.value()))
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Snapshot<T> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Snapshot<T>> {
        self.snapshot.subscribe()
    }

    /// Remove all entities.
    pub(crate) fn clear(&self) {
        self.by_id.clear();
        self.publish(Vec::new());
    }

    pub(crate) fn len(&self) -> usize {
        self.by_id.len()
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn publish(&self, values: Vec<Arc<T>>) {
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn entries(items: &[(u64, &str)]) -> Vec<(Id, String)> {
        items
            .iter()
            .map(|(id, v)| (Id::Number(*id), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn replace_all_keeps_backend_order() {
        let col: EntityCollection<String> = EntityCollection::new();
        col.replace_all(entries(&[(3, "c"), (1, "a"), (2, "b")]));

        let snap: Vec<String> = col.snapshot().iter().map(|s| (**s).clone()).collect();
        assert_eq!(snap, vec!["c", "a", "b"]);
        assert_eq!(*col.get(&Id::Number(1)).unwrap(), "a");
    }

    #[test]
    fn replace_all_drops_missing_entities() {
        let col: EntityCollection<String> = EntityCollection::new();
        col.replace_all(entries(&[(1, "a"), (2, "b")]));
        col.replace_all(entries(&[(2, "b2")]));

        assert_eq!(col.len(), 1);
        assert!(col.get(&Id::Number(1)).is_none());
        assert_eq!(*col.get(&Id::Number(2)).unwrap(), "b2");
    }

    #[test]
    fn duplicate_ids_keep_last_entity() {
        let col: EntityCollection<String> = EntityCollection::new();
        col.replace_all(entries(&[(1, "first"), (1, "second")]));

        assert_eq!(col.snapshot().len(), 1);
        assert_eq!(*col.get(&Id::Number(1)).unwrap(), "second");
    }

    #[test]
    fn clear_empties_everything() {
        let col: EntityCollection<String> = EntityCollection::new();
        col.replace_all(entries(&[(1, "a"), (2, "b")]));
        assert_eq!(col.len(), 2);

        col.clear();
        assert_eq!(col.len(), 0);
        assert!(col.snapshot().is_empty());
    }

    #[test]
    fn every_mutation_notifies() {
        let col: EntityCollection<String> = EntityCollection::new();
        let mut rx = col.subscribe();
        assert!(!rx.has_changed().unwrap());

        col.replace_all(entries(&[(1, "a")]));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);

        col.clear();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_empty());
    }
}
