use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use filmdex_core::error::CoreError;
use filmdex_core::movie::MovieForm;
use filmdex_core::validation::FieldErrors;
use serde_json::json;

/// Top-level message for a 422 response; the details live in `fields`.
pub const INVALID_FORM_MESSAGE: &str = "The given data was invalid.";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `filmdex_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A rejected form submission, echoing back what was submitted so the
    /// client can repopulate its form.
    #[error("Invalid form: {errors}")]
    InvalidForm {
        errors: FieldErrors,
        old_input: MovieForm,
    },
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Attach the submitted form to a validation failure.
    ///
    /// Any other error passes through unchanged.
    pub fn with_old_input(err: CoreError, old_input: MovieForm) -> Self {
        match err {
            CoreError::Validation(errors) => AppError::InvalidForm { errors, old_input },
            other => AppError::Core(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => {
                    return error_response(
                        StatusCode::NOT_FOUND,
                        "NOT_FOUND",
                        format!("{entity} with id {id} not found"),
                    )
                }
                CoreError::Validation(errors) => json!({
                    "error": INVALID_FORM_MESSAGE,
                    "code": "VALIDATION_ERROR",
                    "fields": errors,
                }),
                CoreError::Storage(msg) | CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    return internal_error();
                }
                CoreError::Io(err) => {
                    tracing::error!(error = %err, "File store error");
                    return internal_error();
                }
            },

            // --- HTTP-specific errors ---
            AppError::InvalidForm { errors, old_input } => json!({
                "error": INVALID_FORM_MESSAGE,
                "code": "VALIDATION_ERROR",
                "fields": errors,
                "old_input": old_input,
            }),
            AppError::BadRequest(msg) => {
                return error_response(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg)
            }
        };

        (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response()
    }
}

fn error_response(status: StatusCode, code: &str, message: String) -> Response {
    let body = json!({
        "error": message,
        "code": code,
    });
    (status, axum::Json(body)).into_response()
}

fn internal_error() -> Response {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
