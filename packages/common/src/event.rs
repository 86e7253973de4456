use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Notification emitted by the blob store for a single object.
///
/// Travels as JSON tagged by `kind`, e.g.
/// `{"kind":"finalized","bucket":"art","name":"illustration/Sarah.jpg",...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StorageEvent {
    Finalized(ObjectFinalized),
    Deleted(ObjectDeleted),
}

impl StorageEvent {
    pub fn topic(&self) -> &'static str {
        match self {
            Self::Finalized(_) => "finalized",
            Self::Deleted(_) => "deleted",
        }
    }

    /// Full object path inside its bucket.
    pub fn object_name(&self) -> &str {
        match self {
            Self::Finalized(obj) => &obj.name,
            Self::Deleted(obj) => &obj.name,
        }
    }
}

/// An object finished uploading, or its metadata changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectFinalized {
    pub bucket: String,
    /// Object path, e.g. `illustration/Sarah.jpg`.
    pub name: String,
    #[serde(default)]
    pub content_type: Option<String>,
    /// Metadata generation. Only `1` denotes a true creation.
    #[serde(deserialize_with = "string_or_number")]
    pub metageneration: String,
}

impl ObjectFinalized {
    pub fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("image/"))
    }

    /// A finalize with any other generation is a move or metadata update.
    pub fn is_creation(&self) -> bool {
        self.metageneration.trim().parse::<u64>() == Ok(1)
    }
}

/// An object was removed from the bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDeleted {
    pub bucket: String,
    pub name: String,
}

/// Generation counters arrive as strings from some notifiers and as numbers
/// from others.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

impl fmt::Display for StorageEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finalized(obj) => write!(f, "finalized {}/{}", obj.bucket, obj.name),
            Self::Deleted(obj) => write!(f, "deleted {}/{}", obj.bucket, obj.name),
        }
    }
}
