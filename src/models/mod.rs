//! Request and Response models for the cache HTTP surface
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies. Cached
//! values themselves travel as raw bytes, not JSON.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::PutQuery;
pub use responses::{
    ClearResponse, ErrorResponse, HealthResponse, PersistResponse, PutResponse, RemoveResponse,
    StatsResponse,
};
