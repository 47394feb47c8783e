//! Common error types for TagVault

use thiserror::Error;

/// Common result type for TagVault operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the TagVault crates
#[derive(Error, Debug)]
pub enum Error {
    /// Upload rejected: neither declared MIME type nor filename extension
    /// matches the audio allow-list
    #[error("Invalid audio format: {0}")]
    InvalidFormat(String),

    /// Object store unreachable or a blob write/read failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Record missing or owned by another user. A single conflated kind so
    /// non-owners cannot distinguish "does not exist" from "not yours".
    #[error("File not found or access denied")]
    NotFoundOrForbidden,

    /// Persistence layer not configured or not reachable (wraps sqlx::Error)
    #[error("Database unavailable: {0}")]
    DatabaseUnavailable(#[from] sqlx::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Corrupt stored data is a database-layer failure, not a
    /// configuration problem
    pub fn decode(msg: impl Into<String>) -> Self {
        Error::DatabaseUnavailable(sqlx::Error::Decode(msg.into().into()))
    }
}
