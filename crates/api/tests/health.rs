//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get};
use sqlx::SqlitePool;
use tower::ServiceExt;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_returns_ok_with_json(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "empty");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["catalog"]["recipes"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_seeded_catalog_size(pool: SqlitePool) {
    let app = common::build_seeded_app(pool).await;
    let json = body_json(get(app, "/health").await).await;

    assert_eq!(json["status"], "ok");
    assert_eq!(json["catalog"]["recipes"], 3);
    assert_eq!(json["catalog"]["ingredients"], 17);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_is_unavailable_when_database_is_closed(pool: SqlitePool) {
    let app = common::build_test_app(pool.clone());
    pool.close().await;

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
    assert!(json.get("catalog").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_route_returns_json_404(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/soups").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "No route for /api/v1/soups");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn response_carries_request_id(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert!(response.headers().contains_key("x-request-id"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cors_preflight_allows_frontend_origin(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/recipes")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:3000"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cors_exposes_request_id(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let request = Request::builder()
        .uri("/health")
        .header("origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response.headers()["access-control-expose-headers"],
        "x-request-id"
    );
}
