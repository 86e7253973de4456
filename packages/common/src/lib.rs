pub mod config;
pub mod event;
pub mod record;
pub mod storage;
pub mod store;

pub use event::{ObjectDeleted, ObjectFinalized, StorageEvent};
pub use record::{ImageRecord, RecordKey, UNORDERED};
