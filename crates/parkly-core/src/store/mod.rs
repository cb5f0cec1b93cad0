// ── Reactive session store ──
//
// Entity storage with push-based change notification.

mod collection;
mod session;

pub use session::SessionStore;
