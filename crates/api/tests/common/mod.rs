//! Shared helpers for the HTTP integration tests.
//!
//! Not every test file uses every helper.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use pantry_api::config::ServerConfig;
use pantry_api::router::build_app_router;
use pantry_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        database_url: "sqlite::memory:".to_string(),
        seed_demo_data: false,
        log_json: false,
    }
}

/// Build the full application router over the given pool, with the same
/// middleware stack production uses.
pub fn build_test_app(pool: SqlitePool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

/// Build the app over a pool loaded with the demo catalog.
pub async fn build_seeded_app(pool: SqlitePool) -> Router {
    pantry_db::seed_demo_data_if_empty(&pool)
        .await
        .expect("seed demo data");
    build_test_app(pool)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
