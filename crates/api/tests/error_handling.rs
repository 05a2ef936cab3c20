//! Tests for `AppError` -> HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server needed.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use pantry_api::error::AppError;
use pantry_core::error::CoreError;

/// Convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Recipe",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Recipe with id 42 not found");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("name: must not be blank".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "name: must not be blank");
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("Unknown ingredient ids: 9".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn conflict_error_returns_409() {
    let err = AppError::Core(CoreError::Conflict("Ingredient 1 is used".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn internal_errors_are_sanitized() {
    for err in [
        AppError::Database(sqlx::Error::PoolTimedOut),
        AppError::Database(sqlx::Error::Protocol("secret detail".into())),
    ] {
        let (status, json) = error_to_response(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["code"], "INTERNAL_ERROR");
        assert_eq!(json["error"], "An internal error occurred");
    }
}

#[tokio::test]
async fn unmatched_route_names_the_path() {
    let (status, json) =
        error_to_response(AppError::RouteNotFound("/api/v1/soups".into())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "No route for /api/v1/soups");
}
