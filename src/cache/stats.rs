//! Cache Statistics Module
//!
//! Snapshot produced by a full reconciliation scan of the cache.

use serde::Serialize;

/// Rough per-entry footprint used for the size estimate.
pub const ESTIMATED_ENTRY_BYTES: usize = 1024;

// == Cache Stats ==
/// Result of `TtlCache::stats`.
///
/// `total`, `valid` and `expired` describe the table as it was before the
/// scan evicted anything; `current_size` is the size afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Entries present when the scan started
    pub total: usize,
    /// Entries that were still fresh
    pub valid: usize,
    /// Entries that were stale and have been evicted
    pub expired: usize,
    /// Entries left after eviction
    pub current_size: usize,
    /// `valid * ESTIMATED_ENTRY_BYTES`
    pub estimated_bytes: usize,
    /// Successful `get` calls since creation
    pub hits: u64,
    /// `get` calls that found nothing fresh
    pub misses: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Builds a snapshot from the scan's counts and the access counters.
    pub fn from_scan(total: usize, valid: usize, hits: u64, misses: u64) -> Self {
        Self {
            total,
            valid,
            expired: total.saturating_sub(valid),
            current_size: valid,
            estimated_bytes: valid * ESTIMATED_ENTRY_BYTES,
            hits,
            misses,
        }
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
