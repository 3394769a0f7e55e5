//! Request coordinator: coalesces identical reads and latches concurrent writes.
//!
//! Reads go through [`RequestCoordinator::cached_get`]: callers asking for the same
//! [`RequestKey`] inside the cache window share one in-flight future and its outcome.
//! Writes go through [`RequestCoordinator::guard_once`]: a named flag rejects a second
//! submission while the first is still running. Successful writes call
//! [`RequestCoordinator::invalidate`] so the next read goes back to the network.
//!
//! One coordinator is built per process (or per test) and handed to the API client.
//! Clones share state.

pub mod cache;
pub mod clock;
pub mod guard;
pub mod key;

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

pub use clock::{Clock, ManualClock, SystemClock};
pub use guard::Guarded;
pub use key::RequestKey;

use cache::PendingEntry;

/// How long a read stays shareable after it was issued.
pub const DEFAULT_CACHE_WINDOW: Duration = Duration::from_millis(1000);

pub struct RequestCoordinator<T = serde_json::Value> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    window: Duration,
    clock: Arc<dyn Clock>,
    pending: Mutex<HashMap<RequestKey, PendingEntry<T>>>,
    flags: Arc<Mutex<HashSet<String>>>,
}

impl<T> RequestCoordinator<T> {
    pub fn new(window: Duration) -> Self {
        Self::with_clock(window, Arc::new(SystemClock))
    }

    pub fn with_clock(window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(Inner {
                window,
                clock,
                pending: Mutex::new(HashMap::new()),
                flags: Arc::new(Mutex::new(HashSet::new())),
            }),
        }
    }

    pub fn window(&self) -> Duration {
        self.inner.window
    }

    fn lock_pending(&self) -> MutexGuard<'_, HashMap<RequestKey, PendingEntry<T>>> {
        self.inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for RequestCoordinator<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_WINDOW)
    }
}

impl<T> Clone for RequestCoordinator<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
