//! Ownership guard
//!
//! Every read, update and delete path goes through this check. "Record
//! does not exist" and "record belongs to someone else" collapse into one
//! error kind so responses never leak whether a foreign id exists.

use tagvault_common::db::AudioFileRecord;
use tagvault_common::{Error, Result};
use uuid::Uuid;

/// Resolve the lookup result to a record the caller is allowed to touch
pub fn assert_owned(record: Option<AudioFileRecord>, user_id: Uuid) -> Result<AudioFileRecord> {
    match record {
        Some(record) if record.user_id == user_id => Ok(record),
        _ => Err(Error::NotFoundOrForbidden),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tagvault_common::db::AudioFormat;

    fn record_owned_by(user_id: Uuid) -> AudioFileRecord {
        AudioFileRecord {
            guid: Uuid::new_v4(),
            user_id,
            file_name: "song.mp3".to_string(),
            file_key: "audio/k/song.mp3".to_string(),
            file_url: "/files/audio/k/song.mp3".to_string(),
            file_size: 10,
            duration: None,
            format: AudioFormat::Mp3,
            title: None,
            artist: None,
            album: None,
            album_artist: None,
            year: None,
            genre: None,
            track_number: None,
            total_tracks: None,
            comment: None,
            composer: None,
            is_modified: false,
            modified_file_key: None,
            modified_file_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn owner_passes() {
        let user = Uuid::new_v4();
        let record = record_owned_by(user);
        assert!(assert_owned(Some(record), user).is_ok());
    }

    #[test]
    fn missing_and_foreign_are_indistinguishable() {
        let user = Uuid::new_v4();
        let foreign = record_owned_by(Uuid::new_v4());

        let missing = assert_owned(None, user).unwrap_err();
        let not_yours = assert_owned(Some(foreign), user).unwrap_err();

        assert!(matches!(missing, Error::NotFoundOrForbidden));
        assert!(matches!(not_yours, Error::NotFoundOrForbidden));
    }
}
