//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;

/// API error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error message; never carries filesystem paths
    pub error: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Request body over the size limit
    PayloadTooLarge(String),
    /// Repository error
    Repository(RepositoryError),
}

impl AppError {
    /// Status code and client-facing message.
    ///
    /// Repository errors are reduced to a fixed message per kind; the full
    /// error with its context only goes to the log.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg.clone()),
            AppError::Repository(e) => match e {
                RepositoryError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "class document not found".to_string())
                }
                RepositoryError::ValidationError { message, .. } => {
                    (StatusCode::BAD_REQUEST, message.clone())
                }
                RepositoryError::CorruptDocument { .. } => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "class document is malformed".to_string(),
                ),
                RepositoryError::WriteFailure { .. } => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to write class document".to_string(),
                ),
                RepositoryError::ConfigurationError { .. }
                | RepositoryError::InternalError { .. } => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                ),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        match &self {
            AppError::Repository(e) if status.is_server_error() => {
                tracing::error!(error = %e, "request failed");
            }
            AppError::Repository(e) => tracing::warn!(error = %e, "request rejected"),
            _ => {}
        }

        (status, Json(ApiError::new(message))).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::ErrorContext;

    #[test]
    fn test_repository_error_mapping() {
        let cases = [
            (RepositoryError::not_found("x"), StatusCode::NOT_FOUND),
            (RepositoryError::validation("missing required fields: date"), StatusCode::BAD_REQUEST),
            (RepositoryError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(AppError::from(err).status_and_message().0, expected);
        }
    }

    #[test]
    fn test_paths_not_leaked() {
        let err = RepositoryError::write_failure_with_context(
            "permission denied: /srv/data/403.json",
            ErrorContext::class_document("save", "403"),
        );
        let (status, message) = AppError::from(err).status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!message.contains("/srv"));
    }
}
