//! Tiered Cache - A bounded in-memory cache fronting a persistent store
//!
//! Provides cache-aside reads with store backfill, LRU eviction under entry
//! count and total cost limits, and explicit persistence.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use api::AppState;
pub use cache::{CacheStats, Cost, TieredCache};
pub use config::Config;
pub use error::{CacheError, Result};
pub use store::{FileStore, InMemoryStore, PersistentStore, StoreError};
