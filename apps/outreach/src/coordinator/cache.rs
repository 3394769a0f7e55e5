use std::future::Future;
use std::time::Instant;

use futures::future::{BoxFuture, FutureExt, Shared};
use tracing::debug;

use super::{RequestCoordinator, RequestKey};
use crate::errors::ApiError;

pub(crate) type SharedResult<T> = Shared<BoxFuture<'static, Result<T, ApiError>>>;

/// A read that is in flight or recently settled. Lives until its window passes
/// or it is invalidated.
pub(crate) struct PendingEntry<T> {
    pub(crate) result: SharedResult<T>,
    pub(crate) created_at: Instant,
}

impl<T> RequestCoordinator<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Returns the shared outcome for `key`, invoking `fetcher` only when no live
    /// entry exists. Expired entries are dropped on every call.
    ///
    /// The fetch runs on its own task, so it completes even if every caller
    /// stops waiting for it. Must be called inside a tokio runtime.
    pub async fn cached_get<F, Fut>(&self, key: RequestKey, fetcher: F) -> Result<T, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let shared = {
            let now = self.inner.clock.now();
            let window = self.inner.window;
            let mut pending = self.lock_pending();
            pending.retain(|_, entry| now.duration_since(entry.created_at) < window);

            let existing = pending.get(&key).map(|entry| entry.result.clone());
            match existing {
                Some(result) => {
                    debug!(key = %key, "Joining pending request");
                    result
                }
                None => {
                    debug!(key = %key, "Cache miss, issuing request");
                    let handle = tokio::spawn(fetcher());
                    let result = handle
                        .map(|joined| joined.unwrap_or_else(|e| Err(ApiError::from(e))))
                        .boxed()
                        .shared();
                    pending.insert(
                        key,
                        PendingEntry {
                            result: result.clone(),
                            created_at: now,
                        },
                    );
                    result
                }
            }
        };

        shared.await
    }
}

impl<T> RequestCoordinator<T> {
    /// Drops every entry whose key starts with `prefix`, or all entries for `None`.
    /// Returns how many were removed.
    pub fn invalidate(&self, prefix: Option<&str>) -> usize {
        let mut pending = self.lock_pending();
        let before = pending.len();
        match prefix {
            Some(prefix) => pending.retain(|key, _| !key.starts_with(prefix)),
            None => pending.clear(),
        }
        let removed = before - pending.len();
        debug!(prefix = prefix.unwrap_or("*"), removed, "Invalidated cached reads");
        removed
    }

    /// Number of entries still inside their window.
    pub fn cached_len(&self) -> usize {
        let now = self.inner.clock.now();
        let window = self.inner.window;
        self.lock_pending()
            .values()
            .filter(|entry| now.duration_since(entry.created_at) < window)
            .count()
    }
}
