//! Tiered Cache Module
//!
//! Cache-aside front over the bounded memory tier and a persistent store.
//!
//! Memory is guarded by a single lock held for exactly one tier operation at a
//! time. Store I/O never happens under that lock: a miss reads the store with
//! the lock released, then re-acquires it only to insert the result.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use crate::cache::{validate_key, CacheStats, Cost, MemoryTier};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::store::PersistentStore;

/// Store-read timeout used when none is configured.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(500);

// == Tiered Cache ==
/// A bounded LRU memory tier backed by a slower persistent store.
///
/// `S` may be unsized, so a cache can own an `Arc<dyn PersistentStore<V>>`.
pub struct TieredCache<V, S: ?Sized> {
    /// Resident entries
    memory: Mutex<MemoryTier<V>>,
    /// Backing store, shared with whoever else writes to it
    store: Arc<S>,
    /// Default timeout for store reads on a miss
    read_timeout: Duration,
}

impl<V, S> TieredCache<V, S>
where
    V: Cost + Clone + Send + Sync + 'static,
    S: PersistentStore<V> + ?Sized,
{
    // == Constructor ==
    /// Creates a cache over `store` with the given limits.
    ///
    /// # Arguments
    /// * `store` - Persistent store consulted on misses
    /// * `max_entries` - Maximum number of resident entries
    /// * `max_cost` - Maximum total cost of resident entries
    pub fn new(store: Arc<S>, max_entries: usize, max_cost: u64) -> Result<Self> {
        Ok(Self {
            memory: Mutex::new(MemoryTier::new(max_entries, max_cost)?),
            store,
            read_timeout: DEFAULT_READ_TIMEOUT,
        })
    }

    /// Creates a cache using the limits and timeout from a `Config`.
    pub fn from_config(config: &Config, store: Arc<S>) -> Result<Self> {
        Ok(Self::new(store, config.max_entries, config.max_cost)?
            .with_read_timeout(config.store_timeout()))
    }

    /// Sets the default store-read timeout used by `get`.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    // == Get ==
    /// Returns the value for `key`, consulting the store on a memory miss.
    ///
    /// A store miss, error, or timeout all yield `Ok(None)`. The only error
    /// is `InvalidArgument` for a bad key.
    pub async fn get(&self, key: &str) -> Result<Option<V>> {
        self.get_with_timeout(key, self.read_timeout).await
    }

    /// Same as `get`, with a caller-supplied store-read timeout.
    pub async fn get_with_timeout(&self, key: &str, timeout: Duration) -> Result<Option<V>> {
        validate_key(key)?;

        let resident = self.memory.lock().await.get(key);
        if let Some(value) = resident {
            debug!(key, "cache hit");
            return Ok(Some(value));
        }

        match self.read_store(key, timeout).await {
            Ok(Some(value)) => Ok(Some(self.backfill(key, value).await)),
            Ok(None) => {
                debug!(key, "cache miss, not in store");
                Ok(None)
            }
            Err(e) => {
                warn!(key, error = %e, "store read failed, treating as miss");
                self.memory.lock().await.record_store_failure();
                Ok(None)
            }
        }
    }

    // == Get Or Fetch ==
    /// Returns the cached value, or runs `fetch` and caches what it returns.
    ///
    /// `fetch` is only awaited when both tiers miss, and never under the lock.
    /// Fetched values go to memory only.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, fetch: F) -> Result<Option<V>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<Option<V>, E>>,
        E: Display,
    {
        if let Some(value) = self.get(key).await? {
            return Ok(Some(value));
        }

        match fetch().await {
            Ok(Some(value)) => {
                debug!(key, "fetched value after miss");
                let cost = value.cost();
                let (value, _) = self
                    .memory
                    .lock()
                    .await
                    .insert_if_absent(key.to_string(), value, cost);
                Ok(Some(value))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(CacheError::FetchFailed(format!("{}: {}", key, e))),
        }
    }

    // == Put ==
    /// Inserts or replaces `key` in memory and marks it most recently used.
    ///
    /// `cost` defaults to the value's estimated cost. Does not write to the
    /// store; call `persist` for that.
    pub async fn put(&self, key: impl Into<String>, value: V, cost: Option<u64>) -> Result<()> {
        let key = key.into();
        validate_key(&key)?;

        let cost = cost.unwrap_or_else(|| value.cost());
        let evicted = self.memory.lock().await.insert(key, value, cost);
        if !evicted.is_empty() {
            debug!(count = evicted.len(), "put evicted entries");
        }

        Ok(())
    }

    // == Remove ==
    /// Removes `key` from memory only. Returns whether it was resident.
    pub async fn remove(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        Ok(self.memory.lock().await.remove(key))
    }

    // == Clear ==
    /// Empties memory. The store is left untouched.
    pub async fn clear(&self) {
        self.memory.lock().await.clear();
        debug!("cache cleared");
    }

    // == Persist ==
    /// Writes `value` to the persistent store without touching memory.
    pub async fn persist(&self, key: &str, value: &V) -> Result<()> {
        validate_key(key)?;

        self.store.write(key, value).await.map_err(|e| {
            error!(key, error = %e, "store write failed");
            CacheError::StoreWriteFailed {
                key: key.to_string(),
                reason: e.to_string(),
            }
        })
    }

    // == Introspection ==
    /// Memory-only residency check. Does not refresh recency.
    pub async fn contains(&self, key: &str) -> bool {
        self.memory.lock().await.contains(key)
    }

    pub async fn len(&self) -> usize {
        self.memory.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.memory.lock().await.is_empty()
    }

    pub async fn total_cost(&self) -> u64 {
        self.memory.lock().await.total_cost()
    }

    pub async fn stats(&self) -> CacheStats {
        self.memory.lock().await.stats()
    }

    /// Returns `(max_entries, max_cost)`.
    pub async fn limits(&self) -> (usize, u64) {
        let memory = self.memory.lock().await;
        (memory.max_entries(), memory.max_cost())
    }

    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Reads from the store with the lock released.
    async fn read_store(&self, key: &str, timeout: Duration) -> Result<Option<V>> {
        match tokio::time::timeout(timeout, self.store.read(key)).await {
            Ok(Ok(found)) => Ok(found),
            Ok(Err(e)) => Err(CacheError::StoreUnavailable(e.to_string())),
            Err(_) => Err(CacheError::StoreUnavailable(format!(
                "read timed out after {}ms",
                timeout.as_millis()
            ))),
        }
    }

    /// Inserts a store result unless another caller already made the key resident.
    async fn backfill(&self, key: &str, value: V) -> V {
        let cost = value.cost();
        let mut memory = self.memory.lock().await;
        let (value, inserted) = memory.insert_if_absent(key.to_string(), value, cost);
        if inserted {
            memory.record_backfill();
            debug!(key, cost, "cache miss, backfilled from store");
        } else {
            debug!(key, "cache miss, key became resident during store read");
        }
        value
    }
}
