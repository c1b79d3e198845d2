//! API Module
//!
//! HTTP handlers and routing exposing the tiered cache.
//!
//! # Endpoints
//! - `PUT /cache/:key` - Cache the request body in memory
//! - `GET /cache/:key` - Retrieve a value, backfilling from the store
//! - `DELETE /cache/:key` - Remove a key from memory
//! - `DELETE /cache` - Clear memory
//! - `PUT /store/:key` - Save the request body to the persistent store
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
