use std::time::Duration;

use async_trait::async_trait;
use s3::bucket::Bucket;
use s3::creds::Credentials;
use s3::region::Region;
use tracing::debug;

use super::error::SignError;
use super::traits::UrlSigner;
use crate::config::StorageConfig;

/// Longest lifetime SigV4 accepts for a presigned request.
pub const MAX_PRESIGN_EXPIRY: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Presigns GET requests against an S3-compatible endpoint.
///
/// A bucket handle is built per call because each storage event names its
/// own bucket.
pub struct S3UrlSigner {
    region: Region,
    credentials: Credentials,
    path_style: bool,
}

impl S3UrlSigner {
    pub fn new(region: Region, credentials: Credentials, path_style: bool) -> Self {
        Self {
            region,
            credentials,
            path_style,
        }
    }

    /// Build a signer from the `storage` config section. Missing keys fall
    /// back to the usual AWS environment/profile lookup.
    pub fn from_config(config: &StorageConfig) -> Result<Self, SignError> {
        let region = match &config.endpoint {
            Some(endpoint) => Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => config.region.parse().map_err(|e| {
                SignError::Config(format!("invalid region '{}': {e}", config.region))
            })?,
        };

        let credentials = Credentials::new(
            config.access_key.as_deref(),
            config.secret_key.as_deref(),
            None,
            None,
            None,
        )
        .map_err(|e| SignError::Config(format!("credentials: {e}")))?;

        Ok(Self::new(region, credentials, config.path_style))
    }

    fn bucket(&self, name: &str) -> Result<Box<Bucket>, SignError> {
        let bucket = Bucket::new(name, self.region.clone(), self.credentials.clone())?;
        Ok(if self.path_style {
            bucket.with_path_style()
        } else {
            bucket
        })
    }
}

#[async_trait]
impl UrlSigner for S3UrlSigner {
    async fn signed_read_url(
        &self,
        bucket: &str,
        path: &str,
        expiry: Duration,
    ) -> Result<String, SignError> {
        let key = path.trim_start_matches('/');
        if key.is_empty() {
            return Err(SignError::InvalidPath(path.to_string()));
        }

        let expiry = expiry.min(MAX_PRESIGN_EXPIRY);
        debug!(bucket, key, expiry_secs = expiry.as_secs(), "Presigning read URL");

        let url = self
            .bucket(bucket)?
            .presign_get(format!("/{key}"), expiry.as_secs() as u32, None)
            .await?;
        Ok(url)
    }
}
