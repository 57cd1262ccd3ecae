//! Partition Module
//!
//! Named response stores backing the edge cache. Each partition is a
//! concurrent map whose individual operations are atomic; in-flight requests
//! for different keys interleave freely without further coordination.

use std::sync::Arc;

use dashmap::DashMap;

use crate::edge::CachedResponse;

// == Partition ==
/// A single named store of response snapshots.
#[derive(Debug, Default)]
pub struct Partition {
    entries: DashMap<String, CachedResponse>,
}

impl Partition {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Match ==
    /// Returns the cached response for `key`, if any.
    pub fn match_key(&self, key: &str) -> Option<CachedResponse> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    // == Put ==
    /// Stores a response snapshot, replacing any previous one.
    pub fn put(&self, key: String, response: CachedResponse) {
        self.entries.insert(key, response);
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Partition Set ==
/// The set of named partitions, analogous to the browser's cache storage.
///
/// Partitions are created on first open and survive until deleted by
/// activation cleanup or an explicit purge.
#[derive(Debug, Default)]
pub struct PartitionSet {
    caches: DashMap<String, Arc<Partition>>,
}

impl PartitionSet {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Open ==
    /// Returns the named partition, creating it if absent.
    pub fn open(&self, name: &str) -> Arc<Partition> {
        self.caches
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Partition::new()))
            .value()
            .clone()
    }

    // == Delete ==
    /// Removes the named partition outright. Returns whether it existed.
    pub fn delete(&self, name: &str) -> bool {
        self.caches.remove(name).is_some()
    }

    // == Names ==
    /// Names of all currently open partitions.
    pub fn names(&self) -> Vec<String> {
        self.caches.iter().map(|entry| entry.key().clone()).collect()
    }
}
