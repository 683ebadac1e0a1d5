use std::sync::OnceLock;

use crate::Ref;

/// Hook for observing blob receipt across any `Storage` implementation that
/// chooses to call it. The default is no observer, so paying no attention to
/// this type costs nothing.
pub trait StoreObserver: Send + Sync + 'static {
    /// Called after a backend accepts a new blob it had not previously held.
    /// Not called for a `receive` of a Ref the backend already holds.
    fn on_receive(&self, r: &Ref, size: u64);
}

static OBSERVER: OnceLock<Box<dyn StoreObserver>> = OnceLock::new();

/// Install the process-wide `StoreObserver`. May only be called once; later
/// calls are ignored (the first observer wins), mirroring the set-once
/// semantics of `OnceLock`.
pub fn set_observer(obs: impl StoreObserver) {
    let _ = OBSERVER.set(Box::new(obs));
}

pub(crate) fn observer() -> Option<&'static dyn StoreObserver> {
    OBSERVER.get().map(|b| b.as_ref())
}
