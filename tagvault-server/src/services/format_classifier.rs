//! Audio/image format classification
//!
//! Pure functions of (filename, declared MIME type). Trust is OR, not AND:
//! a file is accepted when either the declared MIME type or the filename
//! extension is on the allow-list, which tolerates clients that send
//! `application/octet-stream` for correctly named files. Canonical MIME
//! resolution looks at the extension alone.

use tagvault_common::db::AudioFormat;

const AUDIO_MIME_TYPES: &[&str] = &["audio/mpeg", "audio/wav", "audio/x-wav"];
const AUDIO_EXTENSIONS: &[&str] = &[".mp3", ".wav"];

const IMAGE_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];
const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp"];

/// Classification result for an accepted audio upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioClass {
    /// Canonical MIME type, resolved from the extension alone
    pub mime_type: &'static str,
    /// Format tag stored on the record
    pub format: AudioFormat,
}

fn extension(file_name: &str) -> Option<String> {
    let lower = file_name.to_lowercase();
    lower.rsplit_once('.').map(|(_, ext)| ext.to_string())
}

/// Accept when the declared MIME type or the extension is allow-listed
pub fn is_valid_audio(file_name: &str, declared_mime: &str) -> bool {
    let lower = file_name.to_lowercase();
    AUDIO_MIME_TYPES.contains(&declared_mime)
        || AUDIO_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Canonical audio MIME type from the extension alone
pub fn audio_mime_type(file_name: &str) -> &'static str {
    match extension(file_name).as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        _ => "audio/mpeg",
    }
}

/// Format tag from the extension alone.
///
/// Everything that is not `.wav` resolves to mp3, including names the
/// validator rejects. A `.flac` name forced through still tags mp3; this
/// quirk is part of the contract.
pub fn audio_format(file_name: &str) -> AudioFormat {
    match extension(file_name).as_deref() {
        Some("wav") => AudioFormat::Wav,
        _ => AudioFormat::Mp3,
    }
}

/// Classify an audio upload; `None` when neither the declared MIME type
/// nor the extension is acceptable
pub fn classify_audio(file_name: &str, declared_mime: &str) -> Option<AudioClass> {
    if !is_valid_audio(file_name, declared_mime) {
        return None;
    }
    Some(AudioClass {
        mime_type: audio_mime_type(file_name),
        format: audio_format(file_name),
    })
}

/// Accept when the declared MIME type or the extension is allow-listed
pub fn is_valid_image(file_name: &str, declared_mime: &str) -> bool {
    let lower = file_name.to_lowercase();
    IMAGE_MIME_TYPES.contains(&declared_mime)
        || IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Canonical image MIME type from the extension alone
pub fn image_mime_type(file_name: &str) -> &'static str {
    match extension(file_name).as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}
