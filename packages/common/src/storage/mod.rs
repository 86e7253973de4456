mod error;
mod traits;

pub mod public;
#[cfg(feature = "object-storage")]
pub mod presign;

pub use error::SignError;
pub use traits::UrlSigner;
