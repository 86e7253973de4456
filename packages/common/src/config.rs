use std::time::Duration;

use serde::Deserialize;

/// App-level MQ configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct MqAppConfig {
    /// Whether the storage event consumer runs. Default: true.
    #[serde(default = "default_mq_enabled")]
    pub enabled: bool,
    /// Redis connection URL. Default: "redis://localhost:6379".
    #[serde(default = "default_mq_url")]
    pub url: String,
    /// Connection pool size. Default: 5.
    #[serde(default = "default_mq_pool_size")]
    pub pool_size: u8,
    /// Queue the blob store notifier publishes to. Default: "storage_events".
    #[serde(default = "default_mq_queue_name")]
    pub queue_name: String,
    /// Events handled concurrently. Default: 4.
    #[serde(default = "default_mq_concurrency")]
    pub concurrency: usize,
}

fn default_mq_enabled() -> bool {
    true
}
fn default_mq_url() -> String {
    "redis://localhost:6379".into()
}
fn default_mq_pool_size() -> u8 {
    5
}
fn default_mq_queue_name() -> String {
    "storage_events".into()
}
fn default_mq_concurrency() -> usize {
    4
}

impl Default for MqAppConfig {
    fn default() -> Self {
        Self {
            enabled: default_mq_enabled(),
            url: default_mq_url(),
            pool_size: default_mq_pool_size(),
            queue_name: default_mq_queue_name(),
            concurrency: default_mq_concurrency(),
        }
    }
}

/// How read URLs for uploaded images are produced.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SigningBackend {
    /// Presigned GET against an S3-compatible endpoint.
    #[default]
    S3,
    /// Unsigned URL under `public_base_url`, for public buckets.
    Public,
}

/// Blob store access configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: SigningBackend,
    /// Region name. Default: "us-east-1".
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint (MinIO, R2, ...). Unset means AWS.
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub access_key: Option<String>,
    #[serde(default)]
    pub secret_key: Option<String>,
    /// Use `endpoint/bucket/key` addressing. Default: false.
    #[serde(default)]
    pub path_style: bool,
    /// Base URL for the `public` backend.
    #[serde(default)]
    pub public_base_url: Option<String>,
    /// Requested lifetime of issued URLs. Default: 7 days, the SigV4 ceiling.
    #[serde(default = "default_url_expiry_secs")]
    pub url_expiry_secs: u64,
}

fn default_region() -> String {
    "us-east-1".into()
}
fn default_url_expiry_secs() -> u64 {
    7 * 24 * 60 * 60
}

impl StorageConfig {
    pub fn url_expiry(&self) -> Duration {
        Duration::from_secs(self.url_expiry_secs)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: SigningBackend::default(),
            region: default_region(),
            endpoint: None,
            access_key: None,
            secret_key: None,
            path_style: false,
            public_base_url: None,
            url_expiry_secs: default_url_expiry_secs(),
        }
    }
}
