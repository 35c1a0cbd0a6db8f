//! Cache Module
//!
//! Provides an in-memory key/value cache with per-entry TTL and lazy eviction.

mod clock;
mod entry;
pub mod fetch;
mod stats;
mod store;


use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

// Re-export public types
pub use clock::{Clock, MockClock, SystemClock};
pub use entry::CacheEntry;
pub use stats::{CacheStats, ESTIMATED_ENTRY_BYTES};
pub use store::TtlCache;

// == Public Constants ==
/// TTL for generic entries when the caller does not pick one.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Cache handle shared between tasks.
///
/// `get`, `has` and `stats` may evict, so they need the write lock.
pub type SharedCache<V> = Arc<RwLock<TtlCache<V>>>;

/// Wraps a cache for sharing between tasks.
pub fn shared<V>(cache: TtlCache<V>) -> SharedCache<V> {
    Arc::new(RwLock::new(cache))
}
