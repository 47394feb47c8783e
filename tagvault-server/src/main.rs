//! tagvault-server - Audio Library Service
//!
//! Lets an authenticated user upload MP3/WAV files, extracts embedded tag
//! metadata on upload, and serves view/edit/re-download of those files.
//! Blobs live in the object store directory under the root folder;
//! structured metadata lives in SQLite next to it.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tagvault_server::storage::FsObjectStore;
use tagvault_server::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting tagvault-server");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Root folder holds the database and the object store directory
    let root_folder = tagvault_common::config::resolve_root_folder();
    tagvault_common::config::ensure_root_folder(&root_folder)
        .map_err(|e| anyhow::anyhow!("Failed to initialize root folder: {}", e))?;
    info!("Root folder: {}", root_folder.display());

    let db_path = root_folder.join("tagvault.db");
    let db_pool = tagvault_common::db::init_database(&db_path).await?;
    info!("Database connection established");

    let blob_dir = root_folder.join("objects");
    let store = Arc::new(FsObjectStore::new(&blob_dir, "/files"));
    info!("Object store: {}", blob_dir.display());

    let state = AppState::new(db_pool, store);
    let app = tagvault_server::build_router(state, &blob_dir);

    let port = tagvault_common::config::resolve_port();
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    info!("Listening on http://127.0.0.1:{}", port);
    info!("Health check: http://127.0.0.1:{}/health", port);

    axum::serve(listener, app).await?;

    Ok(())
}
