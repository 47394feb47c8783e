//! Row models shared between the data access layer and the API

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Audio container format of an uploaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    Wav,
}

impl AudioFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
        }
    }

    /// Parse the stored column value
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "mp3" => Ok(AudioFormat::Mp3),
            "wav" => Ok(AudioFormat::Wav),
            other => Err(Error::decode(format!("Unknown audio format: {}", other))),
        }
    }
}

/// One row of the audio_files table
///
/// `guid` and `user_id` are immutable after creation. Every tag field is
/// independently optional; absence means "unknown", not empty string.
#[derive(Debug, Clone, Serialize)]
pub struct AudioFileRecord {
    pub guid: Uuid,
    pub user_id: Uuid,
    pub file_name: String,
    pub file_key: String,
    pub file_url: String,
    pub file_size: i64,
    /// Duration in whole seconds, rounded at ingestion time
    pub duration: Option<i64>,
    pub format: AudioFormat,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub album_artist: Option<String>,
    pub year: Option<i64>,
    pub genre: Option<String>,
    pub track_number: Option<i64>,
    pub total_tracks: Option<i64>,
    pub comment: Option<String>,
    pub composer: Option<String>,
    /// False until the user edits metadata for the first time; never reverts
    pub is_modified: bool,
    /// Location of a reprocessed variant, when one exists
    pub modified_file_key: Option<String>,
    pub modified_file_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AudioFileRecord {
    /// Blob key to hand out for download: the reprocessed variant when
    /// present, otherwise the original upload
    pub fn download_key(&self) -> &str {
        self.modified_file_key.as_deref().unwrap_or(&self.file_key)
    }
}

/// Partial metadata submitted by the user
///
/// Only fields present in the input are written; absent fields are left
/// untouched (partial-update semantics, not replace-semantics).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataPatch {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub album_artist: Option<String>,
    pub year: Option<i64>,
    pub genre: Option<String>,
    pub track_number: Option<i64>,
    pub total_tracks: Option<i64>,
    pub comment: Option<String>,
    pub composer: Option<String>,
}

/// One row of the users table
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub guid: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
