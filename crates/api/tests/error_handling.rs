//! Tests for the `AppError` -> HTTP response mapping.
//!
//! No server is needed: each test calls `IntoResponse` directly on an
//! error value and inspects the status and JSON body.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use bucketlist_api::error::AppError;
use bucketlist_core::error::CoreError;
use http_body_util::BodyExt;

/// Convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

/// NotFound carries the entity and id; the same response covers both a
/// missing id and an id owned by someone else.
#[tokio::test]
async fn test_not_found_maps_to_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Bucketlist",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Bucketlist with id 42 not found");
}

/// Validation failures surface the rule message verbatim as a 400.
#[tokio::test]
async fn test_validation_maps_to_400() {
    let err = AppError::Core(CoreError::Validation(
        "Bucketlist name cannot be blank".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Bucketlist name cannot be blank");
}

/// Conflicts (duplicate names, no-op updates) are 409s.
#[tokio::test]
async fn test_conflict_maps_to_409() {
    let err = AppError::Core(CoreError::Conflict("No changes made".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "No changes made");
}

/// Authentication failures are 401s with the guidance message intact.
#[tokio::test]
async fn test_unauthorized_maps_to_401() {
    let err = AppError::Core(CoreError::Unauthorized(
        "Invalid email or password".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Invalid email or password");
}

/// Internal errors are 500s whose body never echoes the original detail.
#[tokio::test]
async fn test_internal_maps_to_sanitized_500() {
    let err = AppError::Core(CoreError::Internal(
        "connection string postgres://admin:hunter2@db failed".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
    assert!(
        !json.to_string().contains("hunter2"),
        "internal detail must not reach the client"
    );
}

/// A sqlx RowNotFound is reported as an ordinary 404.
#[tokio::test]
async fn test_sqlx_row_not_found_maps_to_404() {
    let err = AppError::Database(sqlx::Error::RowNotFound);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

/// Any other sqlx failure is a sanitized 500, not a leaked driver message.
#[tokio::test]
async fn test_sqlx_other_errors_map_to_sanitized_500() {
    let err = AppError::Database(sqlx::Error::PoolTimedOut);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}
