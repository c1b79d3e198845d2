//! Memory Tier Module
//!
//! Bounded in-memory storage combining a HashMap with LRU tracking and dual
//! (entry count + total cost) limits. Everything here is synchronous; callers
//! are expected to hold one lock around each operation.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, LruTracker};
use crate::error::{CacheError, Result};

// == Memory Tier ==
/// Resident entries with LRU eviction under entry-count and cost limits.
#[derive(Debug)]
pub struct MemoryTier<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Sum of resident entry costs
    total_cost: u64,
    /// Maximum number of resident entries
    max_entries: usize,
    /// Maximum total cost of resident entries
    max_cost: u64,
}

impl<V: Clone> MemoryTier<V> {
    // == Constructor ==
    /// Creates an empty tier with the given limits.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries the tier can hold
    /// * `max_cost` - Maximum total cost of resident entries
    ///
    /// Both limits must be positive.
    pub fn new(max_entries: usize, max_cost: u64) -> Result<Self> {
        if max_entries == 0 {
            return Err(CacheError::InvalidArgument(
                "max_entries must be greater than zero".to_string(),
            ));
        }
        if max_cost == 0 {
            return Err(CacheError::InvalidArgument(
                "max_cost must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            total_cost: 0,
            max_entries,
            max_cost,
        })
    }

    // == Get ==
    /// Returns a clone of the resident value and marks it most recently used.
    ///
    /// Records a hit or a miss.
    pub fn get(&mut self, key: &str) -> Option<V> {
        match self.entries.get_mut(key) {
            Some(entry) => {
                let tick = self.lru.touch(key);
                entry.record_access(tick);
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Insert ==
    /// Inserts or replaces an entry and marks it most recently used.
    ///
    /// Evicts least recently used entries until both limits admit the new
    /// entry. If the tier empties and the entry is still too large, it is
    /// admitted on its own. Returns the evicted keys, oldest first.
    pub fn insert(&mut self, key: String, value: V, cost: u64) -> Vec<String> {
        // Replacement drops the old cost before any limit check
        self.detach(&key);

        // An overflowing sum is over any limit
        let mut evicted = Vec::new();
        while !self.entries.is_empty()
            && (self.entries.len() >= self.max_entries
                || self
                    .total_cost
                    .checked_add(cost)
                    .map_or(true, |total| total > self.max_cost))
        {
            let Some(victim) = self.lru.evict_oldest() else {
                break;
            };
            if let Some(old) = self.entries.remove(&victim) {
                self.total_cost -= old.cost;
                debug!(
                    key = %victim,
                    cost = old.cost,
                    last_access = old.last_access,
                    age_ms = old.age_ms(),
                    "evicted least recently used entry"
                );
            }
            self.stats.record_eviction();
            evicted.push(victim);
        }

        if cost > self.max_cost {
            debug!(key = %key, cost, max_cost = self.max_cost, "admitting oversized entry");
        }

        let tick = self.lru.touch(&key);
        self.total_cost += cost;
        self.entries.insert(key, CacheEntry::new(value, cost, tick));
        self.sync_residency();

        evicted
    }

    // == Insert If Absent ==
    /// Inserts the entry only when the key is not already resident.
    ///
    /// When another writer got there first, the resident value wins: it is
    /// touched and returned instead. The flag is true if this call inserted.
    pub fn insert_if_absent(&mut self, key: String, value: V, cost: u64) -> (V, bool) {
        if let Some(entry) = self.entries.get_mut(&key) {
            let tick = self.lru.touch(&key);
            entry.record_access(tick);
            return (entry.value.clone(), false);
        }

        self.insert(key, value.clone(), cost);
        (value, true)
    }

    // == Remove ==
    /// Removes an entry. Returns whether it was resident.
    pub fn remove(&mut self, key: &str) -> bool {
        let removed = self.detach(key);
        self.sync_residency();
        removed
    }

    // == Clear ==
    /// Drops every resident entry and resets total cost to zero.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.total_cost = 0;
        self.sync_residency();
    }

    pub fn record_backfill(&mut self) {
        self.stats.record_backfill();
    }

    pub fn record_store_failure(&mut self) {
        self.stats.record_store_failure();
    }

    // == Stats ==
    /// Returns current statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_cost(&self) -> u64 {
        self.total_cost
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn max_cost(&self) -> u64 {
        self.max_cost
    }

    // == Keys ==
    /// Resident keys from least to most recently used.
    pub fn keys_oldest_first(&self) -> Vec<String> {
        self.lru.iter_oldest_first().cloned().collect()
    }

    /// Removes an entry without refreshing stats.
    fn detach(&mut self, key: &str) -> bool {
        match self.entries.remove(key) {
            Some(old) => {
                self.total_cost -= old.cost;
                self.lru.remove(key);
                true
            }
            None => false,
        }
    }

    fn sync_residency(&mut self) {
        self.stats.set_residency(self.entries.len(), self.total_cost);
    }
}
