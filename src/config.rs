//! Configuration Module
//!
//! Handles loading cache and server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::store::{DEFAULT_EXTENSION, DEFAULT_FOLDER_NAME};

/// Cache and server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the memory tier can hold
    pub max_entries: usize,
    /// Maximum total cost (bytes) of resident entries
    pub max_cost: u64,
    /// Root directory of the file store
    pub store_dir: PathBuf,
    /// File extension used by the file store
    pub store_extension: String,
    /// Store read timeout in milliseconds
    pub store_timeout_ms: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum resident entries (default: 200)
    /// - `MAX_COST` - Maximum resident cost in bytes (default: 200 MiB)
    /// - `STORE_DIR` - File store directory (default: ./downloaded_images)
    /// - `STORE_EXTENSION` - File store extension (default: bin)
    /// - `STORE_TIMEOUT_MS` - Store read timeout (default: 500)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            max_cost: parse_var("MAX_COST").unwrap_or(defaults.max_cost),
            store_dir: env::var("STORE_DIR")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.store_dir),
            store_extension: env::var("STORE_EXTENSION").unwrap_or(defaults.store_extension),
            store_timeout_ms: parse_var("STORE_TIMEOUT_MS").unwrap_or(defaults.store_timeout_ms),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
        }
    }

    /// Store read timeout as a `Duration`.
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 200,
            max_cost: 200 * 1024 * 1024,
            store_dir: PathBuf::from(DEFAULT_FOLDER_NAME),
            store_extension: DEFAULT_EXTENSION.to_string(),
            store_timeout_ms: 500,
            server_port: 3000,
        }
    }
}
