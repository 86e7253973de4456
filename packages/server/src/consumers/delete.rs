use common::ObjectDeleted;
use common::store::RecordStore;
use futures::future::join_all;
use tracing::{error, info, instrument};

use super::HandlerError;
use crate::utils::filename::split_object_path;

/// Tally of one deletion event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeletionOutcome {
    pub matched: usize,
    pub removed: usize,
    pub failed: usize,
}

/// Remove every record of the object's category whose `fileName` matches the
/// deleted object.
///
/// Each matched record is removed independently: a failed removal is logged
/// and counted, and never fails the event.
#[instrument(skip(store, object), fields(bucket = %object.bucket, name = %object.name))]
pub async fn delete_url(
    store: &dyn RecordStore,
    object: &ObjectDeleted,
) -> Result<DeletionOutcome, HandlerError> {
    let (Some(category), file_name) = split_object_path(&object.name) else {
        info!("Deleted object is not inside a category folder, nothing to remove");
        return Ok(DeletionOutcome::default());
    };

    let keys = store.find_by_file_name(category, file_name).await?;
    if keys.is_empty() {
        info!(category, file_name, "No record matched the deleted object");
        return Ok(DeletionOutcome::default());
    }

    let results = join_all(
        keys.iter()
            .map(|&key| async move { (key, store.remove(category, key).await) }),
    )
    .await;

    let mut outcome = DeletionOutcome {
        matched: keys.len(),
        ..Default::default()
    };
    for (key, result) in results {
        match result {
            Ok(()) => {
                outcome.removed += 1;
                info!(category, %key, "Found a record and removed it");
            }
            Err(e) => {
                outcome.failed += 1;
                error!(category, %key, error = %e, "Found a record but failed to remove it");
            }
        }
    }

    info!(
        category,
        file_name,
        matched = outcome.matched,
        removed = outcome.removed,
        failed = outcome.failed,
        "Processed deleted object"
    );
    Ok(outcome)
}
