use std::time::Duration;

use async_trait::async_trait;

use super::error::SignError;

/// Issues read URLs for objects in the blob store.
#[async_trait]
pub trait UrlSigner: Send + Sync {
    /// Produce a URL granting read access to `bucket/path` for `expiry`.
    ///
    /// Backends with a shorter maximum lifetime clamp `expiry` to it.
    async fn signed_read_url(
        &self,
        bucket: &str,
        path: &str,
        expiry: Duration,
    ) -> Result<String, SignError>;
}
