//! Cache Module
//!
//! Provides a bounded in-memory LRU tier with cost accounting, fronting a
//! persistent store with cache-aside semantics.

mod cost;
mod entry;
mod lru;
mod memory;
mod stats;
mod tiered;


// Re-export public types
pub use cost::Cost;
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use memory::MemoryTier;
pub use stats::CacheStats;
pub use tiered::{TieredCache, DEFAULT_READ_TIMEOUT};

use crate::error::{CacheError, Result};

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

// == Key Validation ==
/// Rejects empty keys and keys longer than `MAX_KEY_LENGTH` bytes.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidArgument(
            "Key cannot be empty".to_string(),
        ));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(CacheError::InvalidArgument(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    Ok(())
}
