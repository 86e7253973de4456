use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::error::StoreError;
use super::traits::{RecordSource, RecordStore};
use crate::record::{ImageRecord, RecordKey, sort_records};

/// In-process record store.
///
/// Each category keeps its records in append order, mirroring the
/// push-ordered collections of the hosted database. Used for tests and
/// local previews.
#[derive(Default)]
pub struct MemoryRecordStore {
    categories: RwLock<BTreeMap<String, Vec<(RecordKey, ImageRecord)>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in a category, in any order state.
    pub async fn len(&self, category: &str) -> usize {
        self.categories
            .read()
            .await
            .get(category)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl RecordSource for MemoryRecordStore {
    async fn lookup_by_category(
        &self,
        category: &str,
    ) -> Result<Option<Vec<ImageRecord>>, StoreError> {
        let categories = self.categories.read().await;
        let Some(entries) = categories.get(category).filter(|e| !e.is_empty()) else {
            return Ok(None);
        };

        let mut records: Vec<ImageRecord> = entries.iter().map(|(_, r)| r.clone()).collect();
        sort_records(&mut records);
        Ok(Some(records))
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn append(&self, category: &str, record: ImageRecord) -> Result<RecordKey, StoreError> {
        let key = Uuid::now_v7();
        self.categories
            .write()
            .await
            .entry(category.to_string())
            .or_default()
            .push((key, record));
        Ok(key)
    }

    async fn find_by_file_name(
        &self,
        category: &str,
        file_name: &str,
    ) -> Result<Vec<RecordKey>, StoreError> {
        let categories = self.categories.read().await;
        Ok(categories
            .get(category)
            .into_iter()
            .flatten()
            .filter(|(_, r)| r.file_name == file_name)
            .map(|(key, _)| *key)
            .collect())
    }

    async fn remove(&self, category: &str, key: RecordKey) -> Result<(), StoreError> {
        let mut categories = self.categories.write().await;
        let entries = categories
            .get_mut(category)
            .ok_or_else(|| StoreError::NotFound {
                category: category.to_string(),
                key,
            })?;

        let before = entries.len();
        entries.retain(|(k, _)| *k != key);
        if entries.len() == before {
            return Err(StoreError::NotFound {
                category: category.to_string(),
                key,
            });
        }
        if entries.is_empty() {
            categories.remove(category);
        }
        Ok(())
    }

    async fn categories(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.categories.read().await.keys().cloned().collect())
    }
}
