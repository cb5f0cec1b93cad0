// ── Snapshot subscriptions ──
//
// A page reads the collection as it is now and may wait for the next
// reload. Snapshots keep the order the backend listed entities in.

mod filter;

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::model::{Lot, Reservation};

pub use filter::{LotFilter, ReservationFilter};

/// One immutable listing of a collection, shared by every reader.
pub type Snapshot<T> = Arc<Vec<Arc<T>>>;

/// Subscription to one collection of the [`SessionStore`](crate::SessionStore).
pub struct EntityStream<T: Send + Sync + 'static> {
    seen: Snapshot<T>,
    receiver: watch::Receiver<Snapshot<T>>,
}

impl<T: Send + Sync + 'static> EntityStream<T> {
    pub(crate) fn new(receiver: watch::Receiver<Snapshot<T>>) -> Self {
        let seen = receiver.borrow().clone();
        Self { seen, receiver }
    }

    /// The snapshot taken at subscription or by the last `changed()`.
    pub fn current(&self) -> &Snapshot<T> {
        &self.seen
    }

    /// The store's snapshot right now.
    pub fn latest(&self) -> Snapshot<T> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next reload or clear. `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<Snapshot<T>> {
        self.receiver.changed().await.ok()?;
        self.seen = self.receiver.borrow_and_update().clone();
        Some(Arc::clone(&self.seen))
    }

    /// Entities of the latest snapshot accepted by `keep`, in order.
    pub fn select(&self, keep: impl Fn(&T) -> bool) -> Vec<Arc<T>> {
        self.receiver
            .borrow()
            .iter()
            .filter(|entity| keep(entity))
            .cloned()
            .collect()
    }

    pub fn into_stream(self) -> EntityWatchStream<T> {
        EntityWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

impl EntityStream<Lot> {
    pub fn matching(&self, filter: &LotFilter) -> Vec<Arc<Lot>> {
        self.select(|lot| filter.matches(lot))
    }
}

impl EntityStream<Reservation> {
    pub fn matching(&self, filter: &ReservationFilter) -> Vec<Arc<Reservation>> {
        self.select(|reservation| filter.matches(reservation))
    }
}

/// Yields the current snapshot, then one per reload or clear.
pub struct EntityWatchStream<T: Send + Sync + 'static> {
    inner: WatchStream<Snapshot<T>>,
}

impl<T: Send + Sync + 'static> Stream for EntityWatchStream<T> {
    type Item = Snapshot<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
