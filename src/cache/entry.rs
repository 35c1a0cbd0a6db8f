//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

// == Cache Entry ==
/// A stored value together with the time it was written and its time-to-live.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Write timestamp (Unix milliseconds)
    pub stored_at: u64,
    /// How long the entry stays fresh after `stored_at`
    pub ttl: Duration,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry stamped at `stored_at`.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `stored_at` - Write time in Unix milliseconds
    /// * `ttl` - Freshness window starting at `stored_at`
    pub fn new(value: V, stored_at: u64, ttl: Duration) -> Self {
        Self {
            value,
            stored_at,
            ttl,
        }
    }

    /// Milliseconds elapsed since the entry was written.
    ///
    /// A clock that went backwards reports an age of zero.
    pub fn age_ms(&self, now: u64) -> u64 {
        now.saturating_sub(self.stored_at)
    }

    // == Is Expired ==
    /// Checks whether the entry is stale at `now` (Unix milliseconds).
    ///
    /// Boundary condition: an entry whose age equals its TTL is still fresh.
    /// It only expires once the age strictly exceeds the TTL.
    pub fn is_expired_at(&self, now: u64) -> bool {
        u128::from(self.age_ms(now)) > self.ttl.as_millis()
    }

    // == Time To Live ==
    /// Remaining freshness in milliseconds.
    ///
    /// # Returns
    /// `0` once expired, and also at the exact boundary where the entry is
    /// still fresh.
    pub fn ttl_remaining_ms(&self, now: u64) -> u64 {
        let ttl_ms = u64::try_from(self.ttl.as_millis()).unwrap_or(u64::MAX);
        ttl_ms.saturating_sub(self.age_ms(now))
    }
}
