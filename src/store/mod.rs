//! Persistent Store Module
//!
//! The slow, fallible tier behind the cache. The cache only ever reads from a
//! store on its own; writes are always initiated by the caller.

mod fs;
mod memory;

use async_trait::async_trait;
use thiserror::Error;

pub use fs::{FileStore, DEFAULT_EXTENSION, DEFAULT_FOLDER_NAME};
pub use memory::InMemoryStore;

// == Store Error ==
/// Failure reported by a persistent store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key cannot be represented by this store
    #[error("Invalid key for store: {0}")]
    InvalidKey(String),

    /// Store is offline or refused the request
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

// == Persistent Store Trait ==
/// Backing store consulted on cache misses.
#[async_trait]
pub trait PersistentStore<V>: Send + Sync {
    /// Reads a value. `Ok(None)` means the store does not hold the key.
    async fn read(&self, key: &str) -> Result<Option<V>, StoreError>;

    /// Durably writes a value, replacing any previous one.
    async fn write(&self, key: &str, value: &V) -> Result<(), StoreError>;
}
