//! Mapping repository failures onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{ErrorResponse, MessageResponse};
use crate::db::repository::RepositoryError;

/// Error type returned by the handlers.
///
/// Missing rows surface as 404 with a `{"message": ...}` body. Every other
/// repository failure surfaces as 500 with an `{"error": ...}` body.
#[derive(Debug)]
pub enum AppError {
    /// A row the request named does not exist
    NotFound(String),
    /// Any failure reported by the storage layer
    Repository(RepositoryError),
}

impl AppError {
    /// Convert a repository error, substituting `message` when the row is missing.
    ///
    /// Lookup handlers use this to attach their entity-specific 404 message
    /// while passing every other failure through unchanged.
    pub fn not_found_as(err: RepositoryError, message: &str) -> Self {
        match err {
            RepositoryError::NotFound { .. } => Self::NotFound(message.to_string()),
            other => Self::Repository(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(MessageResponse::new(message))).into_response()
            }
            AppError::Repository(err) => {
                // Lookups normally map NotFound before it reaches here.
                if let RepositoryError::NotFound { .. } = err {
                    return (
                        StatusCode::NOT_FOUND,
                        Json(MessageResponse::new(err.to_string())),
                    )
                        .into_response();
                }

                tracing::error!(error = %err, "repository error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: err.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}
