//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no router is
//! involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use filmdex_api::error::AppError;
use filmdex_core::error::CoreError;
use filmdex_core::movie::MovieForm;
use filmdex_core::validation::{FieldErrors, MSG_ID_TAKEN};
use http_body_util::BodyExt;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

fn id_taken() -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.add("id", MSG_ID_TAKEN);
    errors
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::movie_not_found("m42"));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Movie with id m42 not found");
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("invalid multipart body".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "invalid multipart body");
}

#[tokio::test]
async fn validation_error_returns_422_with_fields() {
    let err = AppError::Core(CoreError::Validation(id_taken()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["fields"]["id"][0], MSG_ID_TAKEN);
    assert!(json.get("old_input").is_none());
}

#[tokio::test]
async fn invalid_form_echoes_old_input() {
    let old_input = MovieForm {
        id: Some("m1".into()),
        title: Some("Inception".into()),
        ..MovieForm::default()
    };
    let err = AppError::with_old_input(CoreError::Validation(id_taken()), old_input);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["fields"]["id"][0], MSG_ID_TAKEN);
    assert_eq!(json["old_input"]["title"], "Inception");
    assert!(json["old_input"]["cast"].is_null());
}

#[tokio::test]
async fn with_old_input_passes_other_errors_through() {
    let err = AppError::with_old_input(CoreError::movie_not_found("m1"), MovieForm::default());

    let (status, _) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::Core(CoreError::Internal("secret database credentials leaked".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(
        !json.to_string().contains("secret"),
        "Internal error response must not leak sensitive details"
    );
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn storage_and_io_errors_are_sanitized() {
    for err in [
        CoreError::Storage("connection refused at 10.0.0.5".into()),
        CoreError::Io(std::io::Error::other("disk /var/secret full")),
    ] {
        let (status, json) = error_to_response(AppError::Core(err)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["code"], "INTERNAL_ERROR");
        assert_eq!(json["error"], "An internal error occurred");
    }
}
