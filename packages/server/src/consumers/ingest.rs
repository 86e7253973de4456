use std::fmt;

use common::{ImageRecord, ObjectFinalized, RecordKey};
use tracing::{info, instrument};

use super::{EventContext, HandlerError};
use crate::utils::filename::split_object_path;

/// Why a finalize event produced no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotAnImage(Option<String>),
    NotACreation(String),
    NoCategory,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnImage(Some(ct)) => write!(f, "not an image ({ct})"),
            Self::NotAnImage(None) => write!(f, "not an image (no content type)"),
            Self::NotACreation(generation) => {
                write!(f, "not a creation event (metageneration = {generation})")
            }
            Self::NoCategory => write!(f, "object is not inside a category folder"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    Recorded {
        category: String,
        file_name: String,
        key: RecordKey,
    },
    Skipped(SkipReason),
}

fn skipped(reason: SkipReason) -> Result<IngestOutcome, HandlerError> {
    info!(%reason, "Skipping finalized object");
    Ok(IngestOutcome::Skipped(reason))
}

/// Record a read URL for a newly uploaded image.
///
/// Appends `{fileName, url, text: "", order: "-"}` under the object's folder.
/// Re-uploading a name appends a second record.
#[instrument(skip(ctx, object), fields(bucket = %object.bucket, name = %object.name))]
pub async fn record_url(
    ctx: &EventContext,
    object: &ObjectFinalized,
) -> Result<IngestOutcome, HandlerError> {
    if !object.is_image() {
        return skipped(SkipReason::NotAnImage(object.content_type.clone()));
    }

    if !object.is_creation() {
        return skipped(SkipReason::NotACreation(object.metageneration.clone()));
    }

    let (Some(category), file_name) = split_object_path(&object.name) else {
        return skipped(SkipReason::NoCategory);
    };

    let url = ctx
        .signer
        .signed_read_url(&object.bucket, &object.name, ctx.url_expiry)
        .await
        .map_err(|source| HandlerError::Sign {
            path: object.name.clone(),
            source,
        })?;

    let key = ctx
        .store
        .append(category, ImageRecord::new(file_name, url))
        .await?;

    info!(category, file_name, %key, "Recorded image URL");

    Ok(IngestOutcome::Recorded {
        category: category.to_string(),
        file_name: file_name.to_string(),
        key,
    })
}
