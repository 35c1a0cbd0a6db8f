//! Cache-aside helpers
//!
//! Read through a shared cache and fall back to an async source on a miss.
//! The lock is released before the source is awaited, so a slow lookup never
//! blocks other readers.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::cache::SharedCache;

/// Returns the cached value for `key`, or awaits `fetch` and caches its
/// successful result for `ttl`.
///
/// Errors from `fetch` are returned as-is and never cached.
pub async fn get_or_fetch<V, E, F, Fut>(
    cache: &SharedCache<V>,
    key: &str,
    ttl: Duration,
    fetch: F,
) -> Result<V, E>
where
    V: Clone,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<V, E>>,
{
    let cached = {
        let mut guard = cache.write().await;
        guard.get(key).cloned()
    };

    if let Some(value) = cached {
        return Ok(value);
    }

    refresh(cache, key, ttl, fetch).await
}

/// Always awaits `fetch` and overwrites the cached value on success.
pub async fn refresh<V, E, F, Fut>(
    cache: &SharedCache<V>,
    key: &str,
    ttl: Duration,
    fetch: F,
) -> Result<V, E>
where
    V: Clone,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<V, E>>,
{
    let value = fetch().await?;
    debug!(key, "caching fetched value");
    cache.write().await.set_with_ttl(key, value.clone(), ttl);
    Ok(value)
}

/// Drops the cached value for `key`. Returns whether one was present.
pub async fn invalidate<V>(cache: &SharedCache<V>, key: &str) -> bool {
    cache.write().await.delete(key)
}
