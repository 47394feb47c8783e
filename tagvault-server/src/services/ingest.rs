//! Upload ingestion workflow
//!
//! classify -> extract -> store bytes -> persist row, for a single new
//! file. The object-store write happens before the database insert so a
//! record, once it exists, always has a resolvable blob; a failed store
//! write leaves no orphan row.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use tagvault_common::db::AudioFileRecord;
use tagvault_common::{Error, Result};

use crate::db::audio_files;
use crate::services::format_classifier;
use crate::services::metadata_extractor::MetadataExtractor;
use crate::storage::ObjectStore;

/// Ingest one uploaded file and return the new record id
pub async fn ingest(
    db: &SqlitePool,
    store: &dyn ObjectStore,
    user_id: Uuid,
    file_name: &str,
    declared_mime: &str,
    bytes: &[u8],
    file_size: i64,
) -> Result<Uuid> {
    // Uploads arrive with client-chosen names; keep the final component only
    let file_name = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name)
        .to_string();

    let class = format_classifier::classify_audio(&file_name, declared_mime).ok_or_else(|| {
        Error::InvalidFormat(format!(
            "Only MP3 and WAV files are supported (got {} / {})",
            file_name, declared_mime
        ))
    })?;

    // Best-effort: unreadable tags degrade to an all-absent record
    let metadata = MetadataExtractor::new().extract(bytes, class.mime_type);

    // Blob key namespaced by owner plus a fresh random identifier
    let file_key = format!("audio/{}/{}/{}", user_id, Uuid::new_v4(), file_name);
    let stored = store
        .put(&file_key, bytes, class.mime_type)
        .await
        .map_err(Error::from)?;

    let now = Utc::now();
    let record = AudioFileRecord {
        guid: Uuid::new_v4(),
        user_id,
        file_name,
        file_key,
        file_url: stored.url,
        file_size,
        // Whole seconds in the row; the extractor keeps fractional precision
        duration: metadata.duration_secs.map(|d| d.round() as i64),
        format: class.format,
        title: metadata.title,
        artist: metadata.artist,
        album: metadata.album,
        album_artist: metadata.album_artist,
        year: metadata.year.map(i64::from),
        genre: metadata.genre,
        track_number: metadata.track_number.map(i64::from),
        total_tracks: metadata.total_tracks.map(i64::from),
        comment: metadata.comment,
        composer: metadata.composer,
        is_modified: false,
        modified_file_key: None,
        modified_file_url: None,
        created_at: now,
        updated_at: now,
    };

    audio_files::insert_file(db, &record).await?;

    info!(
        file_id = %record.guid,
        user_id = %user_id,
        file_name = %record.file_name,
        format = record.format.as_str(),
        duration = ?record.duration,
        "Ingested audio file"
    );

    Ok(record.guid)
}
