//! Request DTOs for the cache HTTP surface
//!
//! Defines the query parameters accepted alongside raw-byte request bodies.

use serde::Deserialize;

/// Query string for the PUT operation (PUT /cache/:key)
///
/// # Fields
/// - `cost`: Optional explicit cost; defaults to the body length
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PutQuery {
    /// Optional explicit cost in bytes
    #[serde(default)]
    pub cost: Option<u64>,
}
