//! Audio metadata extraction service
//!
//! Parses the tag container embedded in an uploaded buffer (ID3v2, RIFF
//! INFO, ...) into a canonical record using lofty.
//!
//! Extraction is best-effort: ingestion must proceed even when tags are
//! unreadable, so `extract` never fails. Parse errors are logged and
//! collapse to a record with every field absent.

use lofty::picture::Picture;
use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::tag::Tag;
use std::io::Cursor;
use tracing::{debug, warn};

/// Canonical metadata produced by extraction
///
/// Transient: ingestion copies the scalar fields into the database row.
/// Every field is independently optional; `Default` is the all-absent
/// record returned for unparseable buffers. `duration_secs` keeps
/// fractional precision; rounding to whole seconds happens at the point of
/// persistence, not here.
#[derive(Debug, Clone, Default)]
pub struct CanonicalMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub album_artist: Option<String>,
    pub year: Option<u32>,
    pub genre: Option<String>,
    pub track_number: Option<u32>,
    pub total_tracks: Option<u32>,
    pub comment: Option<String>,
    pub composer: Option<String>,
    pub duration_secs: Option<f64>,
    /// Raw bytes of the first embedded picture, when any
    pub artwork: Option<Vec<u8>>,
    pub artwork_mime_type: Option<String>,
}

/// Metadata extractor service
pub struct MetadataExtractor {}

impl MetadataExtractor {
    /// Create new metadata extractor
    pub fn new() -> Self {
        Self {}
    }

    /// Extract metadata from an audio buffer
    ///
    /// Never fails: corrupt headers, truncated buffers and unsupported
    /// container internals all degrade to the empty record.
    pub fn extract(&self, bytes: &[u8], declared_mime: &str) -> CanonicalMetadata {
        match self.parse(bytes) {
            Ok(metadata) => metadata,
            Err(err) => {
                warn!(
                    declared_mime = %declared_mime,
                    error = %err,
                    "Tag parse failed, continuing with empty metadata"
                );
                CanonicalMetadata::default()
            }
        }
    }

    fn parse(&self, bytes: &[u8]) -> anyhow::Result<CanonicalMetadata> {
        let tagged_file = Probe::new(Cursor::new(bytes)).guess_file_type()?.read()?;

        let duration_secs = Some(tagged_file.properties().duration().as_secs_f64());

        // Prefer the container's primary tag (ID3v2 over ID3v1 etc.)
        let tag = tagged_file.primary_tag().or_else(|| tagged_file.first_tag());

        let mut metadata = CanonicalMetadata {
            duration_secs,
            ..CanonicalMetadata::default()
        };

        if let Some(tag) = tag {
            Self::read_tag(&mut metadata, tag);
        }

        debug!(
            title = ?metadata.title,
            artist = ?metadata.artist,
            duration_s = ?metadata.duration_secs,
            has_artwork = metadata.artwork.is_some(),
            "Extracted metadata"
        );

        Ok(metadata)
    }

    /// Copy tag fields into the canonical record
    fn read_tag(metadata: &mut CanonicalMetadata, tag: &Tag) {
        metadata.title = tag.title().map(|s| s.to_string());
        metadata.artist = tag.artist().map(|s| s.to_string());
        metadata.album = tag.album().map(|s| s.to_string());
        metadata.album_artist = tag
            .get_string(&ItemKey::AlbumArtist)
            .map(|s| s.to_string());
        metadata.year = tag.year();
        // Multi-valued frames keep the first entry only
        metadata.genre = tag
            .get_strings(&ItemKey::Genre)
            .next()
            .map(|s| s.to_string());
        metadata.comment = tag
            .get_strings(&ItemKey::Comment)
            .next()
            .map(|s| s.to_string());
        metadata.composer = tag
            .get_strings(&ItemKey::Composer)
            .next()
            .map(|s| s.to_string());
        metadata.track_number = tag.track();
        metadata.total_tracks = tag.track_total();

        if let Some(picture) = tag.pictures().first() {
            metadata.artwork_mime_type = Self::picture_mime(picture);
            metadata.artwork = Some(picture.data().to_vec());
        }
    }

    fn picture_mime(picture: &Picture) -> Option<String> {
        picture.mime_type().map(|mime| mime.to_string())
    }
}

impl Default for MetadataExtractor {
    fn default() -> Self {
        Self::new()
    }
}
