//! Cache maintenance: stale-entry and full purges.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::store::SuggestionCache;
use crate::Error;

/// Files and directories found under a cache subtree.
#[derive(Debug, Default)]
struct Tree {
    files: Vec<(PathBuf, Duration)>,
    dirs: Vec<PathBuf>,
}

impl SuggestionCache {
    /// Directory holding all cached suggestion lists.
    pub fn searches_root(&self) -> PathBuf {
        self.root().join("searches")
    }

    /// Delete entries older than `max_age`, then any empty shard directories.
    ///
    /// Returns the number of deleted files and directories.
    pub async fn purge_stale(&self, max_age: Duration) -> Result<u64, Error> {
        let tree = walk(&self.searches_root()).await?;
        let mut removed = 0u64;

        for (path, age) in &tree.files {
            if *age > max_age {
                tracing::debug!(path = %path.display(), age_secs = age.as_secs(), "removing expired entry");
                tokio::fs::remove_file(path)
                    .await
                    .map_err(|e| Error::Cache(format!("cannot remove {}: {e}", path.display())))?;
                removed += 1;
            }
        }

        let mut dirs = tree.dirs;
        dirs.sort_by_key(|d| std::cmp::Reverse(d.components().count()));
        for dir in dirs {
            if is_empty_dir(&dir).await? {
                tracing::debug!(path = %dir.display(), "removing empty directory");
                tokio::fs::remove_dir(&dir)
                    .await
                    .map_err(|e| Error::Cache(format!("cannot remove {}: {e}", dir.display())))?;
                removed += 1;
            }
        }

        Ok(removed)
    }

    /// Delete every cached entry.
    ///
    /// Returns the number of deleted files and directories below the
    /// searches root, counted the same way as [`Self::purge_stale`].
    pub async fn clear(&self) -> Result<u64, Error> {
        let root = self.searches_root();
        let tree = walk(&root).await?;
        if tree.files.is_empty() && tree.dirs.is_empty() && !root.exists() {
            return Ok(0);
        }

        tokio::fs::remove_dir_all(&root)
            .await
            .map_err(|e| Error::Cache(format!("cannot remove {}: {e}", root.display())))?;

        Ok((tree.files.len() + tree.dirs.len()) as u64)
    }
}

/// Collect every file (with its age) and directory below `root`.
async fn walk(root: &Path) -> Result<Tree, Error> {
    let mut tree = Tree::default();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => continue,
            Err(e) => return Err(Error::Cache(format!("cannot list {}: {e}", dir.display()))),
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Error::Cache(format!("cannot list {}: {e}", dir.display())))?
        {
            let path = entry.path();
            let meta = entry
                .metadata()
                .await
                .map_err(|e| Error::Cache(format!("cannot stat {}: {e}", path.display())))?;

            if meta.is_dir() {
                pending.push(path.clone());
                tree.dirs.push(path);
            } else {
                let age = meta.modified().ok().and_then(|m| m.elapsed().ok()).unwrap_or_default();
                tree.files.push((path, age));
            }
        }
    }

    Ok(tree)
}

async fn is_empty_dir(dir: &Path) -> Result<bool, Error> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| Error::Cache(format!("cannot list {}: {e}", dir.display())))?;
    let first = entries
        .next_entry()
        .await
        .map_err(|e| Error::Cache(format!("cannot list {}: {e}", dir.display())))?;
    Ok(first.is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheEntry, CacheKey};

    async fn seed(cache: &SuggestionCache, source: &str, query: &str) -> PathBuf {
        let key = CacheKey::new(source, query);
        cache.put(&key, &CacheEntry::new(vec![query.to_string()])).await.unwrap();
        cache.entry_path(&key)
    }

    #[tokio::test]
    async fn test_purge_keeps_fresh_entries() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SuggestionCache::new(dir.path());
        let path = seed(&cache, "google", "rust").await;

        let removed = cache.purge_stale(Duration::from_secs(900)).await.unwrap();
        assert_eq!(removed, 0);
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_purge_removes_stale_entries_and_empty_shards() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SuggestionCache::new(dir.path());
        let path = seed(&cache, "google", "rust").await;
        tokio::time::sleep(Duration::from_millis(20)).await;

        let removed = cache.purge_stale(Duration::ZERO).await.unwrap();

        // one file plus the source dir and two shard levels
        assert_eq!(removed, 4);
        assert!(!path.exists());
        assert!(cache.searches_root().exists());
        assert!(is_empty_dir(&cache.searches_root()).await.unwrap());
    }

    #[tokio::test]
    async fn test_purge_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SuggestionCache::new(dir.path().join("never-created"));
        assert_eq!(cache.purge_stale(Duration::ZERO).await.unwrap(), 0);
        assert_eq!(cache.clear().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SuggestionCache::new(dir.path());
        seed(&cache, "google", "rust").await;
        seed(&cache, "google", "go").await;
        seed(&cache, "ddg", "zig").await;

        // three files, two source dirs, two shard levels per entry
        assert_eq!(cache.clear().await.unwrap(), 11);
        assert!(!cache.searches_root().exists());
    }

    #[tokio::test]
    async fn test_clear_and_full_purge_count_alike() {
        let purged = tempfile::tempdir().unwrap();
        let cleared = tempfile::tempdir().unwrap();
        let purge_cache = SuggestionCache::new(purged.path());
        let clear_cache = SuggestionCache::new(cleared.path());
        for cache in [&purge_cache, &clear_cache] {
            seed(cache, "google", "rust").await;
            seed(cache, "ddg", "zig").await;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;

        let by_purge = purge_cache.purge_stale(Duration::ZERO).await.unwrap();
        let by_clear = clear_cache.clear().await.unwrap();
        assert_eq!(by_purge, 8);
        assert_eq!(by_clear, by_purge);
    }
}
