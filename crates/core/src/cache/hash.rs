//! Content-addressed cache key generation.

use std::path::PathBuf;

use sha2::{Digest, Sha256};

/// Hex SHA-256 digest of `input`.
pub fn digest(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

/// Cache key for one (source, query) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    source_id: String,
    digest: String,
}

impl CacheKey {
    pub fn new(source_id: &str, query: &str) -> Self {
        Self { source_id: source_id.to_string(), digest: digest(query) }
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Entry location relative to the cache root.
    ///
    /// `searches/<source>/<d0d1>/<d2d3>/<digest>.json`: two shard levels
    /// keep any single directory small.
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from("searches")
            .join(&self.source_id)
            .join(&self.digest[..2])
            .join(&self.digest[2..4])
            .join(format!("{}.json", self.digest))
    }
}
