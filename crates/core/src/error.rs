//! Unified error types for searchio.
//!
//! Every variant renders with a stable upper-case code prefix so the
//! presentation layer can show a single readable line per failure.

use crate::config::ConfigError;
use crate::jsonpath::PathSyntaxError;

/// Coarse failure categories reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ConfigLoad,
    InvalidPathExpression,
    Network,
    Decode,
    Extraction,
    Usage,
    Cache,
}

/// Unified error type for the suggestion pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Search document or application configuration could not be loaded.
    #[error("CONFIG_LOAD: {0}")]
    ConfigLoad(String),

    /// The configured JSON path expression does not parse.
    #[error("INVALID_JSONPATH: {path:?}: {source}")]
    InvalidPath { path: String, source: PathSyntaxError },

    /// Connection failure or timeout.
    #[error("NETWORK_ERROR: {0}")]
    Network(String),

    /// Endpoint answered with a non-2xx status.
    #[error("HTTP_ERROR: [{status}] {reason}")]
    HttpStatus { status: u16, reason: String },

    /// Response larger than the configured byte cap.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// Rendered endpoint URL is unusable.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Charset or JSON decoding failed.
    #[error("DECODE_ERROR: {0}")]
    Decode(String),

    /// A matched fragment is not a string scalar.
    #[error("EXTRACT_FAILED: {0}")]
    Extraction(String),

    /// Missing or malformed command-line arguments.
    #[error("USAGE: {0}")]
    Usage(String),

    /// Cache directory or entry I/O failed.
    #[error("CACHE_ERROR: {0}")]
    Cache(String),
}

impl Error {
    /// The user-facing category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ConfigLoad(_) => ErrorKind::ConfigLoad,
            Error::InvalidPath { .. } => ErrorKind::InvalidPathExpression,
            Error::Network(_) | Error::HttpStatus { .. } | Error::FetchTooLarge(_) | Error::InvalidUrl(_) => {
                ErrorKind::Network
            }
            Error::Decode(_) => ErrorKind::Decode,
            Error::Extraction(_) => ErrorKind::Extraction,
            Error::Usage(_) => ErrorKind::Usage,
            Error::Cache(_) => ErrorKind::Cache,
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::ConfigLoad(err.to_string())
    }
}
