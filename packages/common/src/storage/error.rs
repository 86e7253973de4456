use std::fmt;

/// Errors that can occur while producing a read URL for a blob.
#[derive(Debug)]
pub enum SignError {
    /// The signer configuration cannot be used (bad region, credentials...).
    Config(String),
    /// The backend refused to sign the request.
    Backend(String),
    /// The object path cannot be turned into a URL.
    InvalidPath(String),
}

impl fmt::Display for SignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "signer configuration error: {msg}"),
            Self::Backend(msg) => write!(f, "failed to sign URL: {msg}"),
            Self::InvalidPath(path) => write!(f, "invalid object path: {path:?}"),
        }
    }
}

impl std::error::Error for SignError {}

#[cfg(feature = "object-storage")]
impl From<::s3::error::S3Error> for SignError {
    fn from(err: ::s3::error::S3Error) -> Self {
        Self::Backend(err.to_string())
    }
}
