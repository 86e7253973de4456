mod error;
mod traits;

pub mod memory;

pub use error::StoreError;
pub use traits::{RecordSource, RecordStore};
