//! API Handlers
//!
//! HTTP request handlers mapping each route onto one `TieredCache` operation.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::cache::{Cost, TieredCache};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    ClearResponse, HealthResponse, PersistResponse, PutQuery, PutResponse, RemoveResponse,
    StatsResponse,
};
use crate::store::PersistentStore;

/// Byte cache over whichever store the binary was started with.
pub type SharedCache = TieredCache<Bytes, dyn PersistentStore<Bytes>>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared tiered cache; it does its own locking
    pub cache: Arc<SharedCache>,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: SharedCache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration and a store.
    pub fn from_config(config: &Config, store: Arc<dyn PersistentStore<Bytes>>) -> Result<Self> {
        Ok(Self::new(TieredCache::from_config(config, store)?))
    }
}

/// Handler for PUT /cache/:key
///
/// Caches the request body in memory. Does not persist it.
pub async fn put_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<PutQuery>,
    body: Bytes,
) -> Result<Json<PutResponse>> {
    let cost = query.cost.unwrap_or_else(|| body.cost());
    state.cache.put(key.clone(), body, Some(cost)).await?;

    Ok(Json(PutResponse::new(key, cost)))
}

/// Handler for GET /cache/:key
///
/// Returns the raw value, backfilling from the store on a memory miss.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response> {
    match state.cache.get(&key).await? {
        Some(value) => Ok((
            [(header::CONTENT_TYPE, "application/octet-stream")],
            value,
        )
            .into_response()),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /cache/:key
///
/// Removes the key from memory. Removing an absent key still succeeds.
pub async fn remove_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<RemoveResponse>> {
    let removed = state.cache.remove(&key).await?;

    Ok(Json(RemoveResponse::new(key, removed)))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.cache.clear().await;
    Json(ClearResponse::new())
}

/// Handler for PUT /store/:key
///
/// Saves the request body to the persistent store only.
pub async fn persist_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Bytes,
) -> Result<Json<PersistResponse>> {
    state.cache.persist(&key, &body).await?;

    Ok(Json(PersistResponse::new(key, body.len())))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats().await;
    let (max_entries, max_cost) = state.cache.limits().await;

    Json(StatsResponse::new(&stats, max_entries, max_cost))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
