//! Filesystem-backed object store
//!
//! Writes blobs under a root directory and hands out URLs below a public
//! base path (the server mounts a static file service there).

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

use super::{ObjectStore, StorageError, StoredObject};

pub struct FsObjectStore {
    root: PathBuf,
    public_base: String,
}

impl FsObjectStore {
    /// `root` is the blob directory, `public_base` the URL prefix the
    /// server serves it under (e.g. `/files`)
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into(),
        }
    }

    fn object_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base.trim_end_matches('/'), key)
    }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn put(
        &self,
        key: &str,
        bytes: &[u8],
        mime_type: &str,
    ) -> Result<StoredObject, StorageError> {
        let path = self.object_path(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;

        debug!(
            key = %key,
            bytes = bytes.len(),
            mime_type = %mime_type,
            "Stored object"
        );

        Ok(StoredObject {
            url: self.object_url(key),
        })
    }

    async fn get(&self, key: &str) -> Result<StoredObject, StorageError> {
        let path = self.object_path(key);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(StoredObject {
                url: self.object_url(key),
            }),
            Ok(_) => Err(StorageError::NotFound(key.to_string())),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }
}
