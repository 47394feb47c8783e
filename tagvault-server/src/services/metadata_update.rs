//! Metadata update workflow
//!
//! Applies partial-field updates to one or many records. The batch variant
//! runs two explicit phases: an ownership pre-check over every id (any
//! failure rejects the whole batch before anything is written), then
//! independent per-id writes. The write phase is not a multi-row
//! transaction; a mid-batch failure leaves earlier writes in place.

use futures::future::try_join_all;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use tagvault_common::db::MetadataPatch;
use tagvault_common::Result;

use crate::db::audio_files;
use crate::services::ownership::assert_owned;

/// Update one record's metadata
///
/// Only fields present in the patch are written. `is_modified` is set
/// unconditionally, even when the submitted values match the stored ones.
pub async fn update_metadata(
    db: &SqlitePool,
    user_id: Uuid,
    file_id: Uuid,
    patch: &MetadataPatch,
) -> Result<()> {
    let record = audio_files::get_file(db, file_id).await?;
    assert_owned(record, user_id)?;

    audio_files::apply_metadata_patch(db, file_id, patch).await?;

    info!(file_id = %file_id, user_id = %user_id, "Updated metadata");
    Ok(())
}

/// Update many records with the same patch
///
/// Phase 1 validates ownership of every id; one foreign or missing id
/// rejects the entire batch with zero mutations. Phase 2 issues
/// independent per-record writes and returns the attempted count.
pub async fn batch_update_metadata(
    db: &SqlitePool,
    user_id: Uuid,
    file_ids: &[Uuid],
    patch: &MetadataPatch,
) -> Result<usize> {
    // Phase 1: ownership pre-check over independent concurrent lookups
    let records = try_join_all(file_ids.iter().map(|id| audio_files::get_file(db, *id))).await?;
    for record in records {
        assert_owned(record, user_id)?;
    }

    // Phase 2: independent per-id writes, no cross-record transaction
    try_join_all(
        file_ids
            .iter()
            .map(|id| audio_files::apply_metadata_patch(db, *id, patch)),
    )
    .await?;

    info!(
        user_id = %user_id,
        count = file_ids.len(),
        "Batch updated metadata"
    );
    Ok(file_ids.len())
}
