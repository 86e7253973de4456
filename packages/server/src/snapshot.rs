use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use common::ImageRecord;
use common::record::sort_records;
use common::store::{RecordSource, RecordStore, StoreError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const EMBEDDED_SNAPSHOT: &str = include_str!("../assets/snapshot.json");

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Build-time copy of the record store: category name to its records in
/// listing order.
///
/// Serves page renders where the hosting tier forbids calling out to the
/// live store. Loaded once and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    categories: BTreeMap<String, Vec<ImageRecord>>,
}

impl Snapshot {
    /// The snapshot compiled into the binary.
    pub fn embedded() -> Result<Self, SnapshotError> {
        Self::from_json(EMBEDDED_SNAPSHOT)
    }

    /// The snapshot at `path`, or the embedded one when no path is set.
    pub fn load(path: Option<&Path>) -> Result<Self, SnapshotError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::embedded(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, SnapshotError> {
        let json = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let categories: BTreeMap<String, Vec<ImageRecord>> = serde_json::from_str(json)?;
        Ok(Self::from_categories(categories))
    }

    fn from_categories(mut categories: BTreeMap<String, Vec<ImageRecord>>) -> Self {
        categories.retain(|_, records| !records.is_empty());
        for records in categories.values_mut() {
            sort_records(records);
        }
        Self { categories }
    }

    /// Copy every category out of a live store.
    pub async fn capture(store: &dyn RecordStore) -> Result<Self, SnapshotError> {
        let mut categories = BTreeMap::new();
        for category in store.categories().await? {
            if let Some(records) = store.lookup_by_category(&category).await? {
                categories.insert(category, records);
            }
        }
        Ok(Self::from_categories(categories))
    }

    pub fn get(&self, category: &str) -> Option<&[ImageRecord]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[async_trait]
impl RecordSource for Snapshot {
    async fn lookup_by_category(
        &self,
        category: &str,
    ) -> Result<Option<Vec<ImageRecord>>, StoreError> {
        Ok(self.get(category).map(<[ImageRecord]>::to_vec))
    }
}
