//! Test helpers: database/state setup and audio fixture generation

use hound::{WavSpec, WavWriter};
use lofty::config::WriteOptions;
use lofty::picture::{MimeType, Picture, PictureType};
use lofty::prelude::*;
use lofty::tag::{Tag, TagType};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

use tagvault_server::storage::FsObjectStore;
use tagvault_server::AppState;

/// Minimal JPEG header bytes, enough to stand in for embedded artwork
pub const FAKE_JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46];

/// Create a temporary root folder with a file-backed test database and a
/// filesystem object store. The TempDir must be kept alive for the
/// duration of the test.
pub async fn test_state() -> (TempDir, AppState) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let db_path = temp_dir.path().join("test_tagvault.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool: SqlitePool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await
        .expect("Failed to create test database");
    tagvault_common::db::init::init_tables(&pool)
        .await
        .expect("Failed to init tables");

    let blob_dir = temp_dir.path().join("objects");
    std::fs::create_dir_all(&blob_dir).expect("Failed to create blob dir");
    let store = Arc::new(FsObjectStore::new(&blob_dir, "/files"));

    (temp_dir, AppState::new(pool, store))
}

/// Write a sine-tone WAV file (44.1kHz stereo, 16 bit)
pub fn generate_tone_wav(file_path: &Path, duration_secs: f32) {
    let spec = WavSpec {
        channels: 2,
        sample_rate: 44100,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = WavWriter::create(file_path, spec).expect("Failed to create WAV");
    let num_samples = (duration_secs * spec.sample_rate as f32) as usize;

    for i in 0..num_samples {
        let t = i as f32 / spec.sample_rate as f32;
        let sample = (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5;
        let sample_i16 = (sample * 32767.0) as i16;
        writer.write_sample(sample_i16).unwrap();
        writer.write_sample(sample_i16).unwrap();
    }

    writer.finalize().expect("Failed to finalize WAV");
}

/// Tone WAV as an in-memory buffer (an upload body)
pub fn tone_wav_bytes(dir: &Path, duration_secs: f32) -> Vec<u8> {
    let path = dir.join("tone.wav");
    generate_tone_wav(&path, duration_secs);
    std::fs::read(&path).expect("Failed to read WAV")
}

/// Tone WAV with a full ID3v2 tag set and embedded artwork, as bytes
pub fn tagged_wav_bytes(dir: &Path, duration_secs: f32) -> Vec<u8> {
    let path = dir.join("tagged.wav");
    generate_tone_wav(&path, duration_secs);

    let mut tag = Tag::new(TagType::Id3v2);
    tag.set_title("Test Title".to_string());
    tag.set_artist("Test Artist".to_string());
    tag.set_album("Test Album".to_string());
    tag.set_year(2001);
    tag.set_genre("Rock".to_string());
    tag.set_comment("A test comment".to_string());
    tag.set_track(3);
    tag.set_track_total(12);
    tag.insert_text(ItemKey::AlbumArtist, "Test Album Artist".to_string());
    tag.insert_text(ItemKey::Composer, "Test Composer".to_string());
    tag.push_picture(Picture::new_unchecked(
        PictureType::CoverFront,
        Some(MimeType::Jpeg),
        None,
        FAKE_JPEG.to_vec(),
    ));

    tag.save_to_path(&path, WriteOptions::default())
        .expect("Failed to write tags");

    std::fs::read(&path).expect("Failed to read tagged WAV")
}

/// Build a `multipart/form-data` body with a single `file` part
pub fn multipart_body(boundary: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    body
}
