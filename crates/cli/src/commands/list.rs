//! `list` command: configured searches.

use searchio_core::{AppConfig, SearchConfig};

use crate::error::CliError;
use crate::feedback::{Feedback, searches_table};

/// List searches whose title or id contains `filter`, ignoring case.
pub async fn list_impl(config: &AppConfig, filter: Option<&str>, text: bool) -> Result<String, CliError> {
    let mut searches = SearchConfig::list(&config.searches_dir()).await?;

    if let Some(filter) = filter.map(str::to_lowercase).filter(|f| !f.is_empty()) {
        searches.retain(|s| s.title.to_lowercase().contains(&filter) || s.uid.to_lowercase().contains(&filter));
    }

    tracing::debug!(count = searches.len(), "listing searches");

    if text { Ok(searches_table(&searches)) } else { Ok(Feedback::from_searches(&searches).to_json()?) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(root: &std::path::Path) -> AppConfig {
        let config = AppConfig { data_dir: root.join("data"), cache_dir: root.join("cache"), ..Default::default() };
        let dir = config.searches_dir();
        std::fs::create_dir_all(&dir).unwrap();
        let google = r#"{"title": "Google", "keyword": "g", "search_url": "https://g/{query}"}"#;
        std::fs::write(dir.join("google.json"), google).unwrap();
        std::fs::write(dir.join("ddg.json"), r#"{"title": "DuckDuckGo", "search_url": "https://d/{query}"}"#).unwrap();
        config
    }

    #[tokio::test]
    async fn test_list_all_text() {
        let dir = tempfile::tempdir().unwrap();
        let out = list_impl(&config(dir.path()), None, true).await.unwrap();
        assert!(out.starts_with("2 search(es)\n"));
        assert!(out.find("ddg").unwrap() < out.find("google").unwrap());
    }

    #[tokio::test]
    async fn test_list_filter_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let out = list_impl(&config(dir.path()), Some("DUCK"), false).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();

        let items = json["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["arg"], "ddg");
    }

    #[tokio::test]
    async fn test_list_without_searches() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig { data_dir: dir.path().join("empty"), ..Default::default() };
        let out = list_impl(&config, None, true).await.unwrap();
        assert_eq!(out, "0 search(es)\n");
    }
}
