//! Response DTOs for the cache HTTP surface
//!
//! Defines the structure of outgoing JSON response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for the PUT operation (PUT /cache/:key)
#[derive(Debug, Clone, Serialize)]
pub struct PutResponse {
    /// Success message
    pub message: String,
    /// The key that was cached
    pub key: String,
    /// Cost charged for the entry
    pub cost: u64,
}

impl PutResponse {
    /// Creates a new PutResponse
    pub fn new(key: impl Into<String>, cost: u64) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' cached", key),
            key,
            cost,
        }
    }
}

/// Response body for the DELETE operation (DELETE /cache/:key)
#[derive(Debug, Clone, Serialize)]
pub struct RemoveResponse {
    /// The key that was targeted
    pub key: String,
    /// Whether an entry was resident before the call
    pub removed: bool,
}

impl RemoveResponse {
    /// Creates a new RemoveResponse
    pub fn new(key: impl Into<String>, removed: bool) -> Self {
        Self {
            key: key.into(),
            removed,
        }
    }
}

/// Response body for the clear operation (DELETE /cache)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
}

impl ClearResponse {
    pub fn new() -> Self {
        Self {
            message: "Cache cleared".to_string(),
        }
    }
}

impl Default for ClearResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for the persist operation (PUT /store/:key)
#[derive(Debug, Clone, Serialize)]
pub struct PersistResponse {
    /// Success message
    pub message: String,
    /// The key that was saved
    pub key: String,
    /// Number of bytes written
    pub bytes: usize,
}

impl PersistResponse {
    /// Creates a new PersistResponse
    pub fn new(key: impl Into<String>, bytes: usize) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' saved to store", key),
            key,
            bytes,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of memory hits
    pub hits: u64,
    /// Number of memory misses
    pub misses: u64,
    /// Number of misses answered by the store
    pub backfills: u64,
    /// Number of failed or timed out store reads
    pub store_failures: u64,
    /// Number of evictions
    pub evictions: u64,
    /// Current number of resident entries
    pub total_entries: usize,
    /// Current resident cost
    pub total_cost: u64,
    /// Configured entry limit
    pub max_entries: usize,
    /// Configured cost limit
    pub max_cost: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics and limits
    pub fn new(stats: &CacheStats, max_entries: usize, max_cost: u64) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            backfills: stats.backfills,
            store_failures: stats.store_failures,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            total_cost: stats.total_cost,
            max_entries,
            max_cost,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
