//! Cache Statistics Module
//!
//! Session-wide counters for the in-memory cache layer. Only API-store
//! operations feed these counters; the static-asset store is deliberately
//! excluded from hit/miss accounting.

use serde::Serialize;

// == Cache Stats ==
/// Running operation counters for the API cache store.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups that returned fresh data
    pub hits: u64,
    /// Lookups that found nothing fresh (absent or expired)
    pub misses: u64,
    /// Values stored
    pub sets: u64,
    /// Entries removed by explicit clear or pattern invalidation
    pub clears: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 when no lookups have happened.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Set ==
    pub fn record_set(&mut self) {
        self.sets += 1;
    }

    // == Record Clears ==
    /// Adds `count` to the clear counter. A full clear counts as one; a
    /// pattern invalidation counts one per removed key.
    pub fn record_clears(&mut self, count: u64) {
        self.clears += count;
    }

    // == Reset ==
    /// Zeroes all counters without touching any stored entries.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// == Stats Snapshot ==
/// Point-in-time statistics view returned to the monitoring surface.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
    pub clears: u64,
    /// Current API store entry count
    pub size: usize,
    /// Current static-asset store entry count
    pub static_size: usize,
    /// hits / (hits + misses), 0.0 when both are zero
    pub hit_rate: f64,
    pub memory_usage: MemoryUsage,
}

/// Per-store entry counts, in the shape the monitoring view renders.
#[derive(Debug, Clone, Serialize)]
pub struct MemoryUsage {
    pub api: usize,
    #[serde(rename = "static")]
    pub assets: usize,
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.sets, 0);
        assert_eq!(stats.clears, 0);
    }

    #[test]
    fn test_hit_rate_no_lookups() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_hit_rate_all_misses() {
        let mut stats = CacheStats::new();
        stats.record_miss();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_record_clears_accumulates() {
        let mut stats = CacheStats::new();
        stats.record_clears(1);
        stats.record_clears(3);
        assert_eq!(stats.clears, 4);
    }

    #[test]
    fn test_reset_zeroes_everything() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();
        stats.record_set();
        stats.record_clears(2);
        stats.reset();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.sets, 0);
        assert_eq!(stats.clears, 0);
    }

    #[test]
    fn test_snapshot_serializes_static_field() {
        let snapshot = StatsSnapshot {
            hits: 1,
            misses: 1,
            sets: 1,
            clears: 0,
            size: 1,
            static_size: 2,
            hit_rate: 0.5,
            memory_usage: MemoryUsage { api: 1, assets: 2 },
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"static\":2"));
        assert!(json.contains("\"static_size\":2"));
    }
}
