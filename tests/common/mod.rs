#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use campusgate::router::init_router;
use campusgate::state::AppState;
use campusgate_config::RateLimitConfig;
use campusgate_core::LocalObjectStore;
use campusgate_store::{Collection, DocumentStore, MemoryStore};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub router: axum::Router,
    pub store: Arc<MemoryStore>,
    /// Keeps the upload directory alive for the duration of the test.
    pub upload_dir: TempDir,
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with_rate_limit(RateLimitConfig::disabled())
}

pub fn setup_test_app_with_rate_limit(rate_limit_config: RateLimitConfig) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let upload_dir = tempfile::tempdir().unwrap();
    let objects = Arc::new(LocalObjectStore::new(
        upload_dir.path().to_path_buf(),
        "http://localhost:3000/uploads".to_string(),
    ));

    let mut state = AppState::new(store.clone(), objects);
    state.rate_limit_config = rate_limit_config;
    // Parallel tests contend on the same counters and ledgers.
    state.cas_max_attempts = 50;

    TestApp {
        router: init_router(state),
        store,
        upload_dir,
    }
}

/// Inserts a document directly, bypassing the API.
pub async fn seed(store: &MemoryStore, collection: Collection, value: Value) {
    let Value::Object(doc) = value else {
        panic!("seed documents must be objects");
    };
    store.put(collection, doc, None).await.unwrap();
}

pub async fn send(router: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, body)
}

pub async fn get(router: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(router, request).await
}

pub async fn json_request(
    router: &axum::Router,
    method: &str,
    uri: &str,
    body: Value,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();
    send(router, request).await
}

pub async fn post_json(router: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    json_request(router, "POST", uri, body).await
}
