//! tagvault-server library interface
//!
//! Exposes the service internals for integration testing: application
//! state, router construction, the metadata pipeline and the data access
//! layer.

pub mod api;
pub mod db;
pub mod error;
pub mod services;
pub mod storage;

pub use crate::error::{ApiError, ApiResult};

use axum::extract::DefaultBodyLimit;
use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::storage::ObjectStore;

/// Maximum accepted upload size (bytes)
pub const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Object store holding uploaded blobs
    pub store: Arc<dyn ObjectStore>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, store: Arc<dyn ObjectStore>) -> Self {
        Self {
            db,
            store,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// `blob_dir` is the object store directory served statically under
/// `/files` so that the URLs handed out by the store resolve.
pub fn build_router(state: AppState, blob_dir: &Path) -> Router {
    Router::new()
        .merge(api::audio_file_routes())
        .merge(api::health_routes())
        .nest_service("/files", ServeDir::new(blob_dir))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
