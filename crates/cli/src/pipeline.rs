//! The suggestion pipeline entry point.
//!
//! One invocation runs start to finish on the calling task; the first
//! failure aborts it.

use searchio_client::SuggestionSource;
use searchio_core::{AppConfig, Assembly, Environment, Error, JsonPath, SearchConfig, SuggestionCache, assemble};

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub search: SearchConfig,
    pub assembly: Assembly,
}

/// Run the pipeline for `query` against the search `uid`.
///
/// The path expression is compiled before any network activity. A search
/// without a suggest URL skips the cache and the network and yields the
/// query item only.
pub async fn suggest(
    config: &AppConfig, uid: &str, query: &str, source: &dyn SuggestionSource, env: &dyn Environment,
) -> Result<SearchOutcome, Error> {
    let search = SearchConfig::load(&config.searches_dir(), uid).await?;

    let words = if search.supports_suggestions() {
        let path = JsonPath::compile(&search.jsonpath)?;
        let url = search.suggest_url_for(query, env);
        let cache = SuggestionCache::new(&config.cache_dir);

        tracing::debug!(search = %search.title, query, "querying suggest endpoint");
        cache
            .load_or_fetch(&search.uid, query, config.max_age(), || source.suggestions(&url, &path))
            .await?
    } else {
        tracing::debug!(search = %search.uid, "no suggest URL configured");
        Vec::new()
    };

    let assembly = assemble(&search, query, &words, &config.result_options(), env);

    Ok(SearchOutcome { search, assembly })
}
