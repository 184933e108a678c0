//! # API Errors
//!
//! Every handler returns `Result<_, ApiError>`; the error renders as
//! `{"detail": "..."}` with its status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// No document store is configured
    #[error("Database not configured")]
    NotConfigured,

    /// Referenced record does not exist (kind name, e.g. "Model")
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Record failed its field constraints
    #[error("{0}")]
    Validation(String),

    /// Storage operation failed
    #[error("{0}")]
    Store(String),

    /// Invariant broken inside a handler
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotConfigured | ApiError::Store(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotConfigured => ApiError::NotConfigured,
            StoreError::Validation(e) => ApiError::Validation(e.to_string()),
            other => ApiError::Store(other.to_string()),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse {
            detail: self.to_string(),
        });
        (status, body).into_response()
    }
}
