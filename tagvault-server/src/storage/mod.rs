//! Object store abstraction
//!
//! Uploaded blobs live in an object store addressed by opaque string keys.
//! The core only needs `put` and `get`; no delete operation is part of the
//! contract, so deleting a record leaves its blob behind (a documented
//! behavior of the current delete path).

pub mod fs_store;

pub use fs_store::FsObjectStore;

use async_trait::async_trait;
use thiserror::Error;

/// Object store failures
#[derive(Debug, Error)]
pub enum StorageError {
    /// No object stored under the requested key
    #[error("Object not found: {0}")]
    NotFound(String),

    /// Underlying store I/O failure
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for tagvault_common::Error {
    fn from(err: StorageError) -> Self {
        tagvault_common::Error::Storage(err.to_string())
    }
}

/// Reference to a stored object
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// URL the presentation layer can fetch the blob from
    pub url: String,
}

/// Blob storage collaborator
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` under `key`, overwriting any previous object
    async fn put(
        &self,
        key: &str,
        bytes: &[u8],
        mime_type: &str,
    ) -> Result<StoredObject, StorageError>;

    /// Resolve the reference for an existing object
    async fn get(&self, key: &str) -> Result<StoredObject, StorageError>;
}
