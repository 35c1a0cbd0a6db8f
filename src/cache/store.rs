//! Cache Store Module
//!
//! Main cache engine: a HashMap of TTL-stamped entries with lazy eviction.
//! Nothing sweeps the table in the background; stale entries are dropped when
//! a read touches them or when `stats` scans the whole table.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, Clock, SystemClock};

/// Outcome of checking a single key.
enum Freshness {
    Missing,
    Expired,
    Fresh,
}

// == TTL Cache ==
/// In-process key/value store with per-entry expiration.
#[derive(Debug)]
pub struct TtlCache<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// TTL applied by `set`
    default_ttl: Duration,
    /// Time source for stamping and aging entries
    clock: Arc<dyn Clock>,
    hits: u64,
    misses: u64,
}

impl<V> TtlCache<V> {
    // == Constructor ==
    /// Creates an empty cache reading the system clock.
    ///
    /// # Arguments
    /// * `default_ttl` - TTL applied by `set`
    pub fn new(default_ttl: Duration) -> Self {
        Self::with_clock(default_ttl, Arc::new(SystemClock))
    }

    /// Creates an empty cache reading the given clock.
    ///
    /// # Arguments
    /// * `default_ttl` - TTL applied by `set`
    /// * `clock` - Time source used to stamp and age entries
    pub fn with_clock(default_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            default_ttl,
            clock,
            hits: 0,
            misses: 0,
        }
    }

    /// TTL used by `set`.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // == Set ==
    /// Stores `value` under `key` with the default TTL.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        let ttl = self.default_ttl;
        self.set_with_ttl(key, value, ttl);
    }

    /// Stores `value` under `key`, replacing any previous entry and restarting
    /// its clock.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - How long the value stays fresh; zero is allowed
    pub fn set_with_ttl(&mut self, key: impl Into<String>, value: V, ttl: Duration) {
        let key = key.into();
        let now = self.clock.now_ms();
        debug!(
            key = %key,
            ttl_ms = ttl.as_millis() as u64,
            "cache set"
        );
        self.entries.insert(key, CacheEntry::new(value, now, ttl));
    }

    /// Removes `key` if it is stale and reports what was found.
    fn evict_if_stale(&mut self, key: &str) -> Freshness {
        let now = self.clock.now_ms();
        match self.entries.get(key) {
            None => Freshness::Missing,
            Some(entry) if entry.is_expired_at(now) => {
                self.entries.remove(key);
                Freshness::Expired
            }
            Some(_) => Freshness::Fresh,
        }
    }

    // == Get ==
    /// Returns the stored value if it exists and is fresh.
    ///
    /// A stale entry is removed as a side effect. Fresh reads count as hits,
    /// everything else as misses.
    ///
    /// # Arguments
    /// * `key` - The key to retrieve
    pub fn get(&mut self, key: &str) -> Option<&V> {
        match self.evict_if_stale(key) {
            Freshness::Fresh => {
                self.hits += 1;
                debug!(key, "cache hit");
                self.entries.get(key).map(|entry| &entry.value)
            }
            Freshness::Expired => {
                self.misses += 1;
                debug!(key, "cache expired");
                None
            }
            Freshness::Missing => {
                self.misses += 1;
                debug!(key, "cache miss");
                None
            }
        }
    }

    // == TTL Remaining ==
    /// Milliseconds until `key` goes stale.
    ///
    /// Does not evict and does not touch the hit/miss counters.
    ///
    /// # Returns
    /// `None` if the key is missing or already stale.
    pub fn ttl_remaining_ms(&self, key: &str) -> Option<u64> {
        let now = self.clock.now_ms();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| entry.ttl_remaining_ms(now))
    }

    // == Has ==
    /// Same freshness check as `get` without returning the value.
    ///
    /// Evicts a stale entry but leaves the hit/miss counters alone.
    pub fn has(&mut self, key: &str) -> bool {
        matches!(self.evict_if_stale(key), Freshness::Fresh)
    }

    // == Delete ==
    /// Removes an entry, stale or not.
    ///
    /// # Arguments
    /// * `key` - The key to delete
    ///
    /// # Returns
    /// Whether anything was there. Deleting an absent key is not an error.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Removes every entry. The hit/miss counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Removes every key starting with `prefix`, stale or not.
    ///
    /// # Arguments
    /// * `prefix` - Raw string prefix, separator included (`"autocomplete:"`)
    ///
    /// # Returns
    /// The number of entries removed.
    pub fn clear_prefix(&mut self, prefix: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before - self.entries.len();
        debug!(prefix, removed, "cache prefix cleared");
        removed
    }

    /// Counts stored keys starting with `prefix`, including stale ones.
    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.entries
            .keys()
            .filter(|key| key.starts_with(prefix))
            .count()
    }

    // == Stats ==
    /// Scans the whole table, evicts every stale entry and reports the split.
    ///
    /// This is the only operation that fully reconciles the store.
    pub fn stats(&mut self) -> CacheStats {
        let now = self.clock.now_ms();
        let total = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        let stats = CacheStats::from_scan(total, self.entries.len(), self.hits, self.misses);
        if stats.expired > 0 {
            debug!(expired = stats.expired, "stats scan evicted stale entries");
        }
        stats
    }

    // == Length ==
    /// Raw number of stored entries, including stale ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// True when nothing is stored, fresh or stale.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
