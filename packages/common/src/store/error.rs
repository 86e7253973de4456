use thiserror::Error;

use crate::record::RecordKey;

/// Errors raised by record store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing database rejected or failed the operation.
    #[error("record store backend error: {0}")]
    Backend(String),

    /// A record addressed by key does not exist (or no longer exists).
    #[error("record {key} not found in category '{category}'")]
    NotFound { category: String, key: RecordKey },
}
