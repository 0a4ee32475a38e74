//! Shared, mutex-guarded handle to a [`ConfigStore`].
//!
//! # Why opt-in? (for beginners)
//!
//! The plain [`ConfigStore`] is single-threaded on purpose: its contract
//! leaves concurrent mutation *undefined*, and silently wrapping every
//! operation in a lock would change observable behavior (calls could
//! suddenly block).  So the store itself stays lock-free, and callers who
//! want to share one store across threads reach for this wrapper
//! explicitly.
//!
//! `SharedStore` is a cloneable handle: cloning it clones the `Arc`, not
//! the store, so every clone addresses the same entries.  All access goes
//! through [`with`](SharedStore::with), which holds the lock for exactly
//! the duration of the closure.

use std::sync::{Arc, Mutex, PoisonError};

use crate::store::config::ConfigStore;

/// A cloneable, mutex-guarded handle to a [`ConfigStore`].
///
/// # Examples
///
/// ```rust
/// use flatconf_core::{ConfigStore, SharedStore};
///
/// let shared = SharedStore::new(ConfigStore::new("app.conf"));
///
/// shared.with(|store| store.set("mysql.host", "localhost")).unwrap();
/// let host = shared.with(|store| store.get_str("mysql.host", "")).unwrap();
/// assert_eq!(host.value, "localhost");
/// ```
#[derive(Clone, Debug)]
pub struct SharedStore {
    inner: Arc<Mutex<ConfigStore>>,
}

impl SharedStore {
    /// Wraps `store` in a shared handle, taking ownership of it.
    pub fn new(store: ConfigStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Runs `f` with exclusive access to the underlying store.
    ///
    /// A poisoned lock (another thread panicked while holding it) is
    /// recovered rather than propagated: the store holds no invariants a
    /// panic can tear, so the map is still safe to use afterwards.
    pub fn with<R>(&self, f: impl FnOnce(&mut ConfigStore) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}
