use std::time::Duration;

use async_trait::async_trait;

use super::error::SignError;
use super::traits::UrlSigner;

/// Builds plain, non-expiring URLs for publicly readable buckets:
/// `{base_url}/{bucket}/{path}`.
pub struct PublicUrlSigner {
    base_url: String,
}

impl PublicUrlSigner {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl UrlSigner for PublicUrlSigner {
    async fn signed_read_url(
        &self,
        bucket: &str,
        path: &str,
        _expiry: Duration,
    ) -> Result<String, SignError> {
        let key = path.trim_start_matches('/');
        if key.is_empty() || bucket.is_empty() {
            return Err(SignError::InvalidPath(format!("{bucket}/{path}")));
        }

        let encoded: Vec<String> = key.split('/').map(encode_segment).collect();
        Ok(format!(
            "{}/{}/{}",
            self.base_url,
            encode_segment(bucket),
            encoded.join("/")
        ))
    }
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
