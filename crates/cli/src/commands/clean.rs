//! `clean` command: cache maintenance.

use searchio_core::{AppConfig, SuggestionCache};

use crate::error::CliError;

/// Remove expired entries, or every entry when `all` is set.
pub async fn clean_impl(config: &AppConfig, all: bool) -> Result<String, CliError> {
    let cache = SuggestionCache::new(&config.cache_dir);

    let removed = if all { cache.clear().await? } else { cache.purge_stale(config.max_age()).await? };

    tracing::info!(removed, all, cache_dir = %config.cache_dir.display(), "cleaned cache");
    Ok(format!("Removed {removed} cache item(s)\n"))
}
