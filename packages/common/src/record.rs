use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sort key given to freshly ingested images.
///
/// Byte `0x2D` sorts before every digit and letter, so unordered images are
/// listed ahead of anything that already has a real order key.
pub const UNORDERED: &str = "-";

/// Store-generated identity of a record inside its category.
///
/// Keys are UUIDv7, so comparing them yields arrival order.
pub type RecordKey = Uuid;

/// Metadata about one uploaded image, as stored and as served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    /// Basename of the uploaded object.
    #[schema(example = "Sarah.jpg")]
    pub file_name: String,
    /// Read URL for the blob.
    pub url: String,
    /// Caption shown under the image.
    #[serde(default)]
    #[schema(example = "")]
    pub text: String,
    /// Sort key; `"-"` until assigned by hand.
    #[serde(default = "default_order")]
    #[schema(example = "i09")]
    pub order: String,
}

fn default_order() -> String {
    UNORDERED.to_string()
}

impl ImageRecord {
    /// A fresh record for a just-uploaded image: empty caption, unordered.
    pub fn new(file_name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            url: url.into(),
            text: String::new(),
            order: default_order(),
        }
    }

    pub fn is_unordered(&self) -> bool {
        self.order == UNORDERED
    }
}

/// Plain byte-wise comparison of the `order` fields. The sentinel gets no
/// special treatment.
pub fn compare_order(a: &ImageRecord, b: &ImageRecord) -> Ordering {
    a.order.as_bytes().cmp(b.order.as_bytes())
}

/// Sort records ascending by `order`. Stable, so equal keys keep the order
/// they were passed in (arrival order when fed from the store).
pub fn sort_records(records: &mut [ImageRecord]) {
    records.sort_by(compare_order);
}
