//! Audio file API handlers
//!
//! Upload, list, fetch, metadata edit (single and batch), download
//! reference resolution and delete. Every operation runs against the
//! caller's own records; the ownership guard inside the workflows turns
//! foreign ids into 404s.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tagvault_common::db::{AudioFileRecord, MetadataPatch};

use crate::api::identity::Identity;
use crate::db::audio_files;
use crate::error::{ApiError, ApiResult};
use crate::services::{self, assert_owned};
use crate::AppState;

/// POST /audio/files response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub file_id: Uuid,
}

/// POST /audio/files/batch-metadata request
#[derive(Debug, Deserialize)]
pub struct BatchUpdateRequest {
    pub file_ids: Vec<Uuid>,
    #[serde(default)]
    pub metadata: MetadataPatch,
}

/// POST /audio/files/batch-metadata response
#[derive(Debug, Serialize)]
pub struct BatchUpdateResponse {
    pub updated_count: usize,
}

/// GET /audio/files/:id/download response
#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    pub url: String,
    pub file_name: String,
    pub is_modified: bool,
}

/// GET /audio/files
///
/// List the caller's files in upload order.
pub async fn list_files(
    State(state): State<AppState>,
    Identity(user_id): Identity,
) -> ApiResult<Json<Vec<AudioFileRecord>>> {
    let files = audio_files::list_files_by_owner(&state.db, user_id).await?;
    Ok(Json(files))
}

/// GET /audio/files/:id
pub async fn get_file(
    State(state): State<AppState>,
    Identity(user_id): Identity,
    Path(file_id): Path<Uuid>,
) -> ApiResult<Json<AudioFileRecord>> {
    let record = audio_files::get_file(&state.db, file_id).await?;
    let record = assert_owned(record, user_id)?;
    Ok(Json(record))
}

/// POST /audio/files
///
/// Multipart upload; the `file` part carries the audio bytes, its
/// filename and declared content type feed the format classifier.
pub async fn upload_file(
    State(state): State<AppState>,
    Identity(user_id): Identity,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<UploadResponse>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .ok_or_else(|| ApiError::BadRequest("Missing upload filename".to_string()))?;
        let declared_mime = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Upload read failed: {}", e)))?;

        let file_id = services::ingest(
            &state.db,
            state.store.as_ref(),
            user_id,
            &file_name,
            &declared_mime,
            &bytes,
            bytes.len() as i64,
        )
        .await?;

        return Ok((StatusCode::CREATED, Json(UploadResponse { file_id })));
    }

    Err(ApiError::BadRequest(
        "Multipart body has no `file` field".to_string(),
    ))
}

/// PATCH /audio/files/:id/metadata
pub async fn update_metadata(
    State(state): State<AppState>,
    Identity(user_id): Identity,
    Path(file_id): Path<Uuid>,
    Json(patch): Json<MetadataPatch>,
) -> ApiResult<StatusCode> {
    services::update_metadata(&state.db, user_id, file_id, &patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /audio/files/batch-metadata
pub async fn batch_update_metadata(
    State(state): State<AppState>,
    Identity(user_id): Identity,
    Json(request): Json<BatchUpdateRequest>,
) -> ApiResult<Json<BatchUpdateResponse>> {
    let updated_count =
        services::batch_update_metadata(&state.db, user_id, &request.file_ids, &request.metadata)
            .await?;
    Ok(Json(BatchUpdateResponse { updated_count }))
}

/// GET /audio/files/:id/download
///
/// Resolve the blob reference: the reprocessed variant when one exists,
/// otherwise the original upload.
pub async fn download_file(
    State(state): State<AppState>,
    Identity(user_id): Identity,
    Path(file_id): Path<Uuid>,
) -> ApiResult<Json<DownloadResponse>> {
    let record = audio_files::get_file(&state.db, file_id).await?;
    let record = assert_owned(record, user_id)?;

    let stored = state
        .store
        .get(record.download_key())
        .await
        .map_err(tagvault_common::Error::from)?;

    Ok(Json(DownloadResponse {
        url: stored.url,
        file_name: record.file_name,
        is_modified: record.is_modified,
    }))
}

/// DELETE /audio/files/:id
///
/// Removes the row only; the stored blob is left behind.
pub async fn delete_file(
    State(state): State<AppState>,
    Identity(user_id): Identity,
    Path(file_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let record = audio_files::get_file(&state.db, file_id).await?;
    let record = assert_owned(record, user_id)?;

    audio_files::delete_file(&state.db, record.guid).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Build audio file routes
pub fn audio_file_routes() -> Router<AppState> {
    Router::new()
        .route("/audio/files", get(list_files).post(upload_file))
        .route("/audio/files/batch-metadata", post(batch_update_metadata))
        .route("/audio/files/:id", get(get_file).delete(delete_file))
        .route("/audio/files/:id/metadata", patch(update_metadata))
        .route("/audio/files/:id/download", get(download_file))
}
