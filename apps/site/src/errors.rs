use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::cms_client::{FetchError, Resource};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Content unavailable ({resource:?}): {source}")]
    Content {
        resource: Resource,
        #[source]
        source: FetchError,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Carries the text already shown next to the form.
    #[error("Submission failed: {0}")]
    Submission(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn content(resource: Resource, source: FetchError) -> Self {
        AppError::Content { resource, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, retryable) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), false),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone(), false)
            }
            AppError::Content { resource, source } => {
                tracing::error!("Content API error on /{}: {source}", resource.path());
                (
                    StatusCode::BAD_GATEWAY,
                    "CONTENT_UNAVAILABLE",
                    format!("Could not load {}", resource.path()),
                    true,
                )
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone(), true),
            AppError::Submission(msg) => (
                StatusCode::BAD_GATEWAY,
                "SUBMISSION_FAILED",
                msg.clone(),
                true,
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    false,
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
                "retryable": retryable
            }
        }));

        (status, body).into_response()
    }
}
