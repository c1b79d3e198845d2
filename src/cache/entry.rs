//! Cache Entry Module
//!
//! Defines the structure for individual resident entries with cost and recency.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// Represents a single resident entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Cost charged against the total-cost limit
    pub cost: u64,
    /// Recency tick of the last insert or access (higher = more recent)
    pub last_access: u64,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `cost` - Cost charged against the cache's total-cost limit
    /// * `tick` - Recency tick issued by the LRU tracker for this insert
    pub fn new(value: V, cost: u64, tick: u64) -> Self {
        Self {
            value,
            cost,
            last_access: tick,
            created_at: current_timestamp_ms(),
        }
    }

    // == Record Access ==
    /// Refreshes the entry's recency with a newer tick.
    pub fn record_access(&mut self, tick: u64) {
        self.last_access = tick;
    }

    // == Age ==
    /// Returns milliseconds elapsed since the entry was created.
    pub fn age_ms(&self) -> u64 {
        current_timestamp_ms().saturating_sub(self.created_at)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
///
/// A clock set before the epoch reads as 0.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
