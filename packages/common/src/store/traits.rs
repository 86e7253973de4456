use async_trait::async_trait;

use super::error::StoreError;
use crate::record::{ImageRecord, RecordKey};

/// Read-only view of image records grouped by category.
///
/// Implemented by the live store and by the static snapshot so either can
/// back a reader.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// All records of a category sorted by `order`, or `None` when the
    /// category holds nothing.
    async fn lookup_by_category(
        &self,
        category: &str,
    ) -> Result<Option<Vec<ImageRecord>>, StoreError>;
}

/// Category-partitioned record storage.
#[async_trait]
pub trait RecordStore: RecordSource {
    /// Add a record under a freshly generated key. Never overwrites.
    async fn append(&self, category: &str, record: ImageRecord) -> Result<RecordKey, StoreError>;

    /// Keys of every record in `category` whose `fileName` equals `file_name`.
    async fn find_by_file_name(
        &self,
        category: &str,
        file_name: &str,
    ) -> Result<Vec<RecordKey>, StoreError>;

    /// Delete one record by key.
    async fn remove(&self, category: &str, key: RecordKey) -> Result<(), StoreError>;

    /// Names of all categories currently holding records.
    async fn categories(&self) -> Result<Vec<String>, StoreError>;
}
