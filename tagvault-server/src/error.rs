//! Error types for tagvault-server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or invalid caller identity (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Upload rejected by the format allow-list (400)
    #[error("Invalid audio format: {0}")]
    InvalidFormat(String),

    /// Resource not found or owned by another user (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Object store failure (502)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Persistence layer unavailable (503)
    #[error("Database unavailable: {0}")]
    DatabaseUnavailable(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<tagvault_common::Error> for ApiError {
    fn from(err: tagvault_common::Error) -> Self {
        use tagvault_common::Error;
        match err {
            Error::InvalidFormat(msg) => ApiError::InvalidFormat(msg),
            Error::NotFoundOrForbidden => {
                ApiError::NotFound("File not found or access denied".to_string())
            }
            Error::Storage(msg) => ApiError::Storage(msg),
            Error::DatabaseUnavailable(e) => ApiError::DatabaseUnavailable(e.to_string()),
            Error::Config(msg) => ApiError::Internal(msg),
            Error::Io(e) => ApiError::Io(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::InvalidFormat(msg) => (StatusCode::BAD_REQUEST, "INVALID_FORMAT", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::Storage(msg) => (StatusCode::BAD_GATEWAY, "STORAGE_ERROR", msg),
            ApiError::DatabaseUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "DATABASE_UNAVAILABLE",
                msg,
            ),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
            ApiError::Io(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "IO_ERROR",
                err.to_string(),
            ),
            ApiError::Other(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                err.to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
