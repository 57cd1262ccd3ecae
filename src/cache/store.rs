//! Cache Store Module
//!
//! Generic TTL store plus the session cache facade that owns the two
//! configured instances (API responses, static assets) and their shared
//! statistics.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use serde_json::Value;

use crate::cache::{CacheEntry, CacheStats, Clock, MemoryUsage, StatsSnapshot};

// == TTL Store ==
/// Unbounded key-value store with a fixed time-to-live.
///
/// Eviction is time-based only: an expired `get` reports the entry as absent
/// but leaves it in place for the sweeper or an explicit invalidation to
/// remove. Unbounded growth is an accepted limitation of the design.
#[derive(Debug)]
pub struct TtlStore<V> {
    entries: HashMap<String, CacheEntry<V>>,
    ttl_ms: u64,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> TtlStore<V> {
    // == Constructor ==
    /// Creates an empty store with the given TTL and clock.
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            ttl_ms: ttl.as_millis() as u64,
            clock,
        }
    }

    // == Get ==
    /// Returns the value for `key` if present and fresh.
    ///
    /// Absence (never stored, or stale) is a normal outcome, not an error.
    /// Stale entries are not removed here.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();
        self.entries
            .get(key)
            .filter(|entry| entry.is_fresh(self.ttl_ms, now))
            .map(|entry| entry.data.clone())
    }

    // == Set ==
    /// Stores `data` under `key`, replacing any previous entry and stamping
    /// the current time.
    pub fn set(&mut self, key: String, data: V) {
        let entry = CacheEntry::new(data, self.clock.now_ms());
        self.entries.insert(key, entry);
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Remove Matching ==
    /// Removes every key containing `pattern` as a literal substring.
    ///
    /// Returns the number of entries removed.
    pub fn remove_matching(&mut self, pattern: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.contains(pattern));
        before - self.entries.len()
    }

    // == Sweep Expired ==
    /// Removes every entry older than the store's TTL.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.is_fresh(self.ttl_ms, now));
        before - self.entries.len()
    }

    // == Length ==
    /// Current entry count, including entries that are stale but not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Keys ==
    /// Currently stored keys, in no particular order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

// == Static Asset ==
/// In-memory snapshot of a static file, as held by the asset store.
#[derive(Debug, Clone)]
pub struct StaticAsset {
    pub content_type: String,
    pub body: Bytes,
}

// == Session Cache ==
/// The in-memory caching layer for one server session.
///
/// Owns the API response store (short TTL), the static-asset store (long
/// TTL), and the operation counters. Constructed explicitly and passed by
/// reference to consumers; there is no ambient global instance.
#[derive(Debug)]
pub struct SessionCache {
    api: TtlStore<Value>,
    assets: TtlStore<StaticAsset>,
    stats: CacheStats,
}

impl SessionCache {
    // == Constructor ==
    pub fn new(api_ttl: Duration, asset_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            api: TtlStore::new(api_ttl, clock.clone()),
            assets: TtlStore::new(asset_ttl, clock),
            stats: CacheStats::new(),
        }
    }

    // == API Get ==
    /// Looks up a cached API response, recording a hit or miss.
    pub fn get_api(&mut self, key: &str) -> Option<Value> {
        match self.api.get(key) {
            Some(value) => {
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == API Set ==
    /// Stores an API response, recording a set.
    pub fn set_api(&mut self, key: String, value: Value) {
        self.api.set(key, value);
        self.stats.record_set();
    }

    // == API Clear ==
    /// Empties the API store. Counts as a single clear.
    pub fn clear_api(&mut self) {
        self.api.clear();
        self.stats.record_clears(1);
    }

    // == Pattern Invalidation ==
    /// Removes every API entry whose key contains `pattern`, counting one
    /// clear per removed entry. Returns the number removed.
    pub fn clear_by_pattern(&mut self, pattern: &str) -> usize {
        let removed = self.api.remove_matching(pattern);
        self.stats.record_clears(removed as u64);
        removed
    }

    // == Asset Get ==
    /// Looks up a cached static asset. Asset operations do not touch the
    /// statistics counters.
    pub fn get_asset(&self, key: &str) -> Option<StaticAsset> {
        self.assets.get(key)
    }

    // == Asset Set ==
    pub fn set_asset(&mut self, key: String, asset: StaticAsset) {
        self.assets.set(key, asset);
    }

    // == Asset Clear ==
    /// Empties the asset store. Not wired to the monitoring surface.
    pub fn clear_assets(&mut self) {
        self.assets.clear();
    }

    // == Sweep ==
    /// Sweeps both stores against their own TTLs.
    ///
    /// Returns `(api_removed, asset_removed)`.
    pub fn sweep_expired(&mut self) -> (usize, usize) {
        (self.api.sweep_expired(), self.assets.sweep_expired())
    }

    // == Reset Statistics ==
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    // == Snapshot ==
    /// Point-in-time statistics for the monitoring view.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.stats.hits,
            misses: self.stats.misses,
            sets: self.stats.sets,
            clears: self.stats.clears,
            size: self.api.len(),
            static_size: self.assets.len(),
            hit_rate: self.stats.hit_rate(),
            memory_usage: MemoryUsage {
                api: self.api.len(),
                assets: self.assets.len(),
            },
        }
    }

    // == Keys ==
    /// Currently stored keys of both stores.
    pub fn keys(&self) -> (Vec<String>, Vec<String>) {
        (self.api.keys(), self.assets.keys())
    }

    // == Lengths ==
    pub fn api_len(&self) -> usize {
        self.api.len()
    }

    pub fn asset_len(&self) -> usize {
        self.assets.len()
    }
}
