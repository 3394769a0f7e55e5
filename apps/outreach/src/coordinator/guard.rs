use std::collections::HashSet;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::warn;

use super::RequestCoordinator;

/// Outcome of [`RequestCoordinator::guard_once`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Guarded<T> {
    /// The operation ran and settled with this value.
    Completed(T),
    /// Another call holding the same flag was still running; the operation was not invoked.
    Busy,
}

impl<T> Guarded<T> {
    pub fn is_busy(&self) -> bool {
        matches!(self, Guarded::Busy)
    }
}

/// Holds a flag set for as long as it lives. Dropping it clears the flag, so the
/// release happens on success, error, panic or when the future is dropped.
struct FlagGuard {
    flags: Arc<Mutex<HashSet<String>>>,
    name: String,
}

impl Drop for FlagGuard {
    fn drop(&mut self) {
        self.flags
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.name);
    }
}

impl<T> RequestCoordinator<T> {
    /// Runs `operation` under the flag `name`, or returns [`Guarded::Busy`] if the flag
    /// is already held.
    ///
    /// The flag is taken when this method is called, not when the returned future is
    /// first polled, so two back-to-back calls see each other without any await between.
    pub fn guard_once<R, F, Fut>(&self, name: &str, operation: F) -> impl Future<Output = Guarded<R>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = R>,
    {
        let held = self.try_acquire(name);
        async move {
            match held {
                Some(_flag) => Guarded::Completed(operation().await),
                None => Guarded::Busy,
            }
        }
    }

    pub fn is_busy(&self, name: &str) -> bool {
        self.inner
            .flags
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(name)
    }

    fn try_acquire(&self, name: &str) -> Option<FlagGuard> {
        let mut flags = self
            .inner
            .flags
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !flags.insert(name.to_string()) {
            warn!(flag = name, "Operation already in progress, rejecting");
            return None;
        }
        Some(FlagGuard {
            flags: Arc::clone(&self.inner.flags),
            name: name.to_string(),
        })
    }
}
