//! Integration Tests for API Endpoints
//!
//! Tests the full request/response cycle for each endpoint against a
//! file-backed cache in a scratch directory.

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tempfile::TempDir;
use tiered_cache::{api::create_router, AppState, FileStore, PersistentStore, TieredCache};
use tower::ServiceExt;

// == Helper Functions ==

async fn create_test_app(max_entries: usize, max_cost: u64) -> (Router, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn PersistentStore<Bytes>> =
        Arc::new(FileStore::open_default(dir.path()).await.unwrap());
    let cache = TieredCache::new(store, max_entries, max_cost).unwrap();
    (create_router(AppState::new(cache)), dir)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_to_bytes(body: Body) -> Bytes {
    axum::body::to_bytes(body, usize::MAX).await.unwrap()
}

fn request(method: &str, uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(body.into())
        .unwrap()
}

// == PUT /cache Tests ==

#[tokio::test]
async fn test_put_endpoint_success() {
    let (app, _dir) = create_test_app(100, 1024).await;

    let response = app
        .oneshot(request("PUT", "/cache/test_key", "test_value"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["key"], "test_key");
    assert_eq!(json["cost"], 10);
    assert!(json["message"].as_str().unwrap().contains("test_key"));
}

#[tokio::test]
async fn test_put_endpoint_with_explicit_cost() {
    let (app, _dir) = create_test_app(100, 1024).await;

    let response = app
        .clone()
        .oneshot(request("PUT", "/cache/weighted?cost=600", "tiny"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stats = app
        .oneshot(request("GET", "/stats", Body::empty()))
        .await
        .unwrap();
    let json = body_to_json(stats.into_body()).await;
    assert_eq!(json["total_cost"], 600);
}

#[tokio::test]
async fn test_put_key_too_long() {
    let (app, _dir) = create_test_app(100, 1024).await;
    let uri = format!("/cache/{}", "k".repeat(300));

    let response = app.oneshot(request("PUT", &uri, "v")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

// == GET /cache Tests ==

#[tokio::test]
async fn test_get_endpoint_success() {
    let (app, _dir) = create_test_app(100, 1024).await;

    app.clone()
        .oneshot(request("PUT", "/cache/get_test", "get_value"))
        .await
        .unwrap();

    let response = app
        .oneshot(request("GET", "/cache/get_test", Body::empty()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "application/octet-stream"
    );
    assert_eq!(&body_to_bytes(response.into_body()).await[..], b"get_value");
}

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let (app, _dir) = create_test_app(100, 1024).await;

    let response = app
        .oneshot(request("GET", "/cache/missing", Body::empty()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("missing"));
}

// == PUT /store Tests ==

#[tokio::test]
async fn test_persist_writes_file_and_get_backfills() {
    let (app, dir) = create_test_app(100, 1024).await;

    let response = app
        .clone()
        .oneshot(request("PUT", "/store/steve", "image bytes"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["bytes"], 11);
    assert!(dir.path().join("steve.bin").is_file());

    let response = app
        .clone()
        .oneshot(request("GET", "/cache/steve", Body::empty()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(&body_to_bytes(response.into_body()).await[..], b"image bytes");

    let stats = app
        .oneshot(request("GET", "/stats", Body::empty()))
        .await
        .unwrap();
    let json = body_to_json(stats.into_body()).await;
    assert_eq!(json["backfills"], 1);
    assert_eq!(json["total_entries"], 1);
}

#[tokio::test]
async fn test_persist_rejected_by_store_is_reported() {
    let (app, _dir) = create_test_app(100, 1024).await;

    // The file store refuses keys that could leave its directory
    let response = app
        .oneshot(request("PUT", "/store/a%5Cb", "payload"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("a\\b"));
}

// == DELETE Tests ==

#[tokio::test]
async fn test_delete_endpoint_is_idempotent() {
    let (app, _dir) = create_test_app(100, 1024).await;

    app.clone()
        .oneshot(request("PUT", "/cache/to_delete", "value"))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(request("DELETE", "/cache/to_delete", Body::empty()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response.into_body()).await["removed"], true);

    let response = app
        .clone()
        .oneshot(request("DELETE", "/cache/to_delete", Body::empty()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response.into_body()).await["removed"], false);

    let response = app
        .oneshot(request("GET", "/cache/to_delete", Body::empty()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_clear_leaves_store_intact() {
    let (app, _dir) = create_test_app(100, 1024).await;

    app.clone()
        .oneshot(request("PUT", "/store/kept", "durable"))
        .await
        .unwrap();
    app.clone()
        .oneshot(request("GET", "/cache/kept", Body::empty()))
        .await
        .unwrap();
    app.clone()
        .oneshot(request("PUT", "/cache/volatile", "memory only"))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(request("DELETE", "/cache", Body::empty()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(request("GET", "/cache/volatile", Body::empty()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(request("GET", "/cache/kept", Body::empty()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// == Eviction via API Tests ==

#[tokio::test]
async fn test_lru_eviction_via_api() {
    let (app, _dir) = create_test_app(2, 1024).await;

    for (key, value) in [("A", "1"), ("B", "2"), ("C", "3")] {
        app.clone()
            .oneshot(request("PUT", &format!("/cache/{}", key), value))
            .await
            .unwrap();
    }

    let response = app
        .clone()
        .oneshot(request("GET", "/cache/A", Body::empty()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let stats = app
        .oneshot(request("GET", "/stats", Body::empty()))
        .await
        .unwrap();
    let json = body_to_json(stats.into_body()).await;
    assert_eq!(json["evictions"], 1);
    assert_eq!(json["total_entries"], 2);
    assert_eq!(json["max_entries"], 2);
}

// == HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _dir) = create_test_app(100, 1024).await;

    let response = app
        .oneshot(request("GET", "/health", Body::empty()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}
