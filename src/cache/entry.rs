//! Cache Entry Module
//!
//! Defines the structure for individual cache entries. Entries carry only
//! their payload and creation timestamp; freshness is judged against the
//! owning store's TTL, so a re-set replaces the entry wholesale rather than
//! mutating it in place.

// == Cache Entry ==
/// A single cached payload with its creation timestamp.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The cached payload
    pub data: V,
    /// Creation timestamp (Unix milliseconds)
    pub timestamp: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stamped at `now_ms`.
    pub fn new(data: V, now_ms: u64) -> Self {
        Self {
            data,
            timestamp: now_ms,
        }
    }

    // == Age ==
    /// Age of the entry in milliseconds at `now_ms`.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.timestamp)
    }

    // == Is Fresh ==
    /// Whether the entry is still fresh under `ttl_ms` at `now_ms`.
    ///
    /// Boundary condition: an entry is stale once its age reaches the TTL,
    /// i.e. fresh only while `age < ttl`.
    pub fn is_fresh(&self, ttl_ms: u64, now_ms: u64) -> bool {
        self.age_ms(now_ms) < ttl_ms
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("value", 1_000);
        assert_eq!(entry.data, "value");
        assert_eq!(entry.timestamp, 1_000);
    }

    #[test]
    fn test_entry_age() {
        let entry = CacheEntry::new("value", 1_000);
        assert_eq!(entry.age_ms(1_500), 500);
        // Clock skew backwards saturates to zero instead of wrapping.
        assert_eq!(entry.age_ms(500), 0);
    }

    #[test]
    fn test_entry_freshness() {
        let entry = CacheEntry::new("value", 1_000);
        assert!(entry.is_fresh(300, 1_299));
        assert!(!entry.is_fresh(300, 1_300), "stale exactly at TTL boundary");
        assert!(!entry.is_fresh(300, 2_000));
    }
}
