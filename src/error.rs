//! Error types for the tiered cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the tiered cache.
///
/// Capacity pressure and eviction are never errors. A store read failure is
/// absorbed by `get` and only appears here when an operation has no way to
/// degrade.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key not found in either tier
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Empty or malformed key, or an unusable configuration value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Persistent store could not be reached or timed out
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Persistent store rejected an explicit write
    #[error("Store write failed for key '{key}': {reason}")]
    StoreWriteFailed { key: String, reason: String },

    /// Caller-supplied fetch in `get_or_fetch` failed
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            CacheError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::StoreWriteFailed { .. }
            | CacheError::FetchFailed(_)
            | CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the tiered cache.
pub type Result<T> = std::result::Result<T, CacheError>;
