//! Audio file database operations
//!
//! Row-at-a-time access over the audio_files table. Correctness under
//! concurrent callers is delegated to SQLite's per-row atomicity; there is
//! no locking here and no cross-row transaction.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use tagvault_common::db::{AudioFileRecord, AudioFormat, MetadataPatch};
use tagvault_common::{Error, Result};

const RECORD_COLUMNS: &str = r#"
    guid, user_id, file_name, file_key, file_url, file_size, duration,
    format, title, artist, album, album_artist, year, genre, track_number,
    total_tracks, comment, composer, is_modified, modified_file_key,
    modified_file_url, created_at, updated_at
"#;

/// Insert a freshly ingested record
pub async fn insert_file(pool: &SqlitePool, record: &AudioFileRecord) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO audio_files (
            guid, user_id, file_name, file_key, file_url, file_size, duration,
            format, title, artist, album, album_artist, year, genre,
            track_number, total_tracks, comment, composer, is_modified,
            modified_file_key, modified_file_url, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(record.guid.to_string())
    .bind(record.user_id.to_string())
    .bind(&record.file_name)
    .bind(&record.file_key)
    .bind(&record.file_url)
    .bind(record.file_size)
    .bind(record.duration)
    .bind(record.format.as_str())
    .bind(&record.title)
    .bind(&record.artist)
    .bind(&record.album)
    .bind(&record.album_artist)
    .bind(record.year)
    .bind(&record.genre)
    .bind(record.track_number)
    .bind(record.total_tracks)
    .bind(&record.comment)
    .bind(&record.composer)
    .bind(record.is_modified as i64)
    .bind(&record.modified_file_key)
    .bind(&record.modified_file_url)
    .bind(record.created_at.to_rfc3339())
    .bind(record.updated_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Load a record by id
pub async fn get_file(pool: &SqlitePool, file_id: Uuid) -> Result<Option<AudioFileRecord>> {
    let query = format!("SELECT {} FROM audio_files WHERE guid = ?", RECORD_COLUMNS);
    let row = sqlx::query(&query)
        .bind(file_id.to_string())
        .fetch_optional(pool)
        .await?;

    row.map(row_to_record).transpose()
}

/// Load all records owned by a user, in upload order (oldest first)
pub async fn list_files_by_owner(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<Vec<AudioFileRecord>> {
    let query = format!(
        "SELECT {} FROM audio_files WHERE user_id = ? ORDER BY created_at",
        RECORD_COLUMNS
    );
    let rows = sqlx::query(&query)
        .bind(user_id.to_string())
        .fetch_all(pool)
        .await?;

    rows.into_iter().map(row_to_record).collect()
}

/// Apply a sparse metadata patch to one row
///
/// Absent patch fields keep the stored value (COALESCE against the bind).
/// `is_modified` is set unconditionally; it never transitions back to 0.
pub async fn apply_metadata_patch(
    pool: &SqlitePool,
    file_id: Uuid,
    patch: &MetadataPatch,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE audio_files SET
            title = COALESCE(?, title),
            artist = COALESCE(?, artist),
            album = COALESCE(?, album),
            album_artist = COALESCE(?, album_artist),
            year = COALESCE(?, year),
            genre = COALESCE(?, genre),
            track_number = COALESCE(?, track_number),
            total_tracks = COALESCE(?, total_tracks),
            comment = COALESCE(?, comment),
            composer = COALESCE(?, composer),
            is_modified = 1,
            updated_at = ?
        WHERE guid = ?
        "#,
    )
    .bind(&patch.title)
    .bind(&patch.artist)
    .bind(&patch.album)
    .bind(&patch.album_artist)
    .bind(patch.year)
    .bind(&patch.genre)
    .bind(patch.track_number)
    .bind(patch.total_tracks)
    .bind(&patch.comment)
    .bind(&patch.composer)
    .bind(Utc::now().to_rfc3339())
    .bind(file_id.to_string())
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a record by id
///
/// Row delete only; the blob stays in the object store (the store exposes
/// no delete operation).
pub async fn delete_file(pool: &SqlitePool, file_id: Uuid) -> Result<()> {
    sqlx::query("DELETE FROM audio_files WHERE guid = ?")
        .bind(file_id.to_string())
        .execute(pool)
        .await?;

    Ok(())
}

fn row_to_record(row: SqliteRow) -> Result<AudioFileRecord> {
    let guid_str: String = row.get("guid");
    let user_id_str: String = row.get("user_id");
    let format_str: String = row.get("format");
    let is_modified: i64 = row.get("is_modified");

    Ok(AudioFileRecord {
        guid: parse_uuid(&guid_str)?,
        user_id: parse_uuid(&user_id_str)?,
        file_name: row.get("file_name"),
        file_key: row.get("file_key"),
        file_url: row.get("file_url"),
        file_size: row.get("file_size"),
        duration: row.get("duration"),
        format: AudioFormat::parse(&format_str)?,
        title: row.get("title"),
        artist: row.get("artist"),
        album: row.get("album"),
        album_artist: row.get("album_artist"),
        year: row.get("year"),
        genre: row.get("genre"),
        track_number: row.get("track_number"),
        total_tracks: row.get("total_tracks"),
        comment: row.get("comment"),
        composer: row.get("composer"),
        is_modified: is_modified != 0,
        modified_file_key: row.get("modified_file_key"),
        modified_file_url: row.get("modified_file_url"),
        created_at: parse_timestamp(row.get("created_at"))?,
        updated_at: parse_timestamp(row.get("updated_at"))?,
    })
}

fn parse_uuid(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| Error::decode(format!("Bad UUID in audio_files row: {}", e)))
}

fn parse_timestamp(value: String) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::decode(format!("Bad timestamp in audio_files row: {}", e)))
}
