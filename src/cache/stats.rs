//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, backfills and evictions.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of lookups served from memory
    pub hits: u64,
    /// Number of lookups not served from memory (includes backfills)
    pub misses: u64,
    /// Number of misses answered by the persistent store and inserted into memory
    pub backfills: u64,
    /// Number of store reads that errored or timed out
    pub store_failures: u64,
    /// Number of entries evicted due to LRU policy
    pub evictions: u64,
    /// Current number of resident entries
    pub total_entries: usize,
    /// Current total cost of resident entries
    pub total_cost: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the memory hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_backfill(&mut self) {
        self.backfills += 1;
    }

    pub fn record_store_failure(&mut self) {
        self.store_failures += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Update Residency ==
    /// Updates the resident entry count and cost.
    pub fn set_residency(&mut self, entries: usize, cost: u64) {
        self.total_entries = entries;
        self.total_cost = cost;
    }
}
