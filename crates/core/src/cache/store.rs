//! Load-or-fetch suggestion store.

use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::hash::CacheKey;
use crate::Error;

/// A stored suggestion list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub created_at: DateTime<Utc>,
    pub suggestions: Vec<String>,
}

impl CacheEntry {
    pub fn new(suggestions: Vec<String>) -> Self {
        Self { created_at: Utc::now(), suggestions }
    }

    /// True while the entry is younger than `max_age` at `now`.
    ///
    /// An entry stamped in the future is stale.
    pub fn is_fresh(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        let max_age = TimeDelta::from_std(max_age).unwrap_or(TimeDelta::MAX);
        let age = now.signed_duration_since(self.created_at);
        age >= TimeDelta::zero() && age < max_age
    }
}

/// File-backed suggestion cache rooted at a directory.
#[derive(Debug, Clone)]
pub struct SuggestionCache {
    root: PathBuf,
}

impl SuggestionCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of the entry for `key`.
    pub fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.root.join(key.relative_path())
    }

    /// Return the suggestions for (`source_id`, `query`), fetching them when
    /// no fresh entry exists.
    ///
    /// `fetch` runs at most once. Its result is stored only on success; on
    /// failure any stale entry is left untouched and the error is returned.
    pub async fn load_or_fetch<F, Fut>(
        &self, source_id: &str, query: &str, max_age: Duration, fetch: F,
    ) -> Result<Vec<String>, Error>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<String>, Error>>,
    {
        let key = CacheKey::new(source_id, query);

        if let Some(entry) = self.get(&key, max_age).await? {
            tracing::debug!(source = source_id, digest = key.digest(), "cache hit");
            return Ok(entry.suggestions);
        }

        tracing::debug!(source = source_id, digest = key.digest(), "cache miss");
        let suggestions = fetch().await?;
        self.put(&key, &CacheEntry::new(suggestions.clone())).await?;

        Ok(suggestions)
    }

    /// Fresh entry for `key`, if any.
    ///
    /// Stale and unreadable entries count as absent.
    pub async fn get(&self, key: &CacheKey, max_age: Duration) -> Result<Option<CacheEntry>, Error> {
        let Some(entry) = self.read(key).await? else {
            return Ok(None);
        };

        if entry.is_fresh(Utc::now(), max_age) {
            Ok(Some(entry))
        } else {
            tracing::debug!(digest = key.digest(), created_at = %entry.created_at, "cache entry expired");
            Ok(None)
        }
    }

    /// Stored entry for `key` regardless of age.
    pub async fn read(&self, key: &CacheKey) -> Result<Option<CacheEntry>, Error> {
        let path = self.entry_path(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::Cache(format!("cannot read {}: {e}", path.display()))),
        };

        match serde_json::from_slice(&bytes) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring corrupt cache entry: {}", e);
                Ok(None)
            }
        }
    }

    /// Write `entry` for `key`, replacing any existing entry atomically.
    pub async fn put(&self, key: &CacheKey, entry: &CacheEntry) -> Result<(), Error> {
        let path = self.entry_path(key);
        let Some(dir) = path.parent() else {
            return Err(Error::Cache(format!("no parent directory for {}", path.display())));
        };

        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| Error::Cache(format!("cannot create {}: {e}", dir.display())))?;

        let json = serde_json::to_vec(entry).map_err(|e| Error::Cache(format!("cannot encode entry: {e}")))?;

        let tmp = path.with_extension(format!("json.{}.tmp", std::process::id()));
        tokio::fs::write(&tmp, &json)
            .await
            .map_err(|e| Error::Cache(format!("cannot write {}: {e}", tmp.display())))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| Error::Cache(format!("cannot replace {}: {e}", path.display())))?;

        tracing::debug!(path = %path.display(), count = entry.suggestions.len(), "cached suggestions");
        Ok(())
    }
}
