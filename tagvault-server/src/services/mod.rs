//! Core services for tagvault-server
//!
//! The metadata pipeline (classifier + extractor), the ingest and update
//! workflows, and the ownership guard they all share.

pub mod format_classifier;
pub mod ingest;
pub mod metadata_extractor;
pub mod metadata_update;
pub mod ownership;

pub use format_classifier::{
    audio_format, audio_mime_type, classify_audio, image_mime_type, is_valid_audio,
    is_valid_image, AudioClass,
};
pub use ingest::ingest;
pub use metadata_extractor::{CanonicalMetadata, MetadataExtractor};
pub use metadata_update::{batch_update_metadata, update_metadata};
pub use ownership::assert_owned;
