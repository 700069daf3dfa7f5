use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use skydrop_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `skydrop_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message (malformed multipart,
    /// unparseable field values).
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::InvalidInput(_) => {
                    (StatusCode::BAD_REQUEST, "INVALID_INPUT", core.to_string())
                }
                CoreError::DuplicateKey(_) => {
                    (StatusCode::CONFLICT, "DUPLICATE_KEY", core.to_string())
                }
                CoreError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", core.to_string())
                }
                CoreError::InvalidState(_) => {
                    (StatusCode::BAD_REQUEST, "INVALID_STATE", core.to_string())
                }
                CoreError::PreconditionFailed(_) => (
                    StatusCode::BAD_REQUEST,
                    "PRECONDITION_FAILED",
                    core.to_string(),
                ),
                CoreError::CapacityExceeded { .. } => (
                    StatusCode::BAD_REQUEST,
                    "CAPACITY_EXCEEDED",
                    core.to_string(),
                ),
                // Store internals are logged, never leaked to the caller.
                CoreError::Store(msg) => {
                    tracing::error!(error = %msg, "Store error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
