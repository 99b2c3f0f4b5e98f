//! `search` command: suggestions for one query.

use searchio_client::SuggestionSource;
use searchio_core::{AppConfig, Environment};

use crate::error::CliError;
use crate::feedback::{Feedback, suggestions_table};
use crate::pipeline::suggest;

/// Run the pipeline and render its result.
pub async fn search_impl(
    config: &AppConfig, uid: &str, query: &str, text: bool, source: &dyn SuggestionSource, env: &dyn Environment,
) -> Result<String, CliError> {
    let outcome = suggest(config, uid, query, source, env).await?;

    if text {
        Ok(suggestions_table(query, &outcome.assembly))
    } else {
        Ok(Feedback::from_assembly(&outcome.search, &outcome.assembly).to_json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use searchio_core::{Error, JsonPath};

    struct Fixed(Vec<String>);

    #[async_trait::async_trait]
    impl SuggestionSource for Fixed {
        async fn suggestions(&self, _url: &str, _path: &JsonPath) -> Result<Vec<String>, Error> {
            Ok(self.0.clone())
        }
    }

    struct Failing;

    #[async_trait::async_trait]
    impl SuggestionSource for Failing {
        async fn suggestions(&self, _url: &str, _path: &JsonPath) -> Result<Vec<String>, Error> {
            Err(Error::HttpStatus { status: 500, reason: "Internal Server Error".into() })
        }
    }

    fn config(root: &std::path::Path) -> AppConfig {
        let config = AppConfig { data_dir: root.join("data"), cache_dir: root.join("cache"), ..Default::default() };
        std::fs::create_dir_all(config.searches_dir()).unwrap();
        std::fs::write(
            config.searches_dir().join("wiki.json"),
            r#"{"title": "Wikipedia", "icon": "wiki.png", "pcencode": true,
                "search_url": "https://en.wikipedia.org/wiki/{query}",
                "suggest_url": "https://en.wikipedia.org/w/api.php?search={query}", "jsonpath": "$[1][*]"}"#,
        )
        .unwrap();
        config
    }

    #[tokio::test]
    async fn test_search_json_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let env: HashMap<String, String> = HashMap::new();
        let source = Fixed(vec!["Rust (language)".into()]);

        let out = search_impl(&config, "wiki", "rus", false, &source, &env).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();

        let item = &json["items"][0];
        assert_eq!(item["title"], "Rust (language)");
        assert_eq!(item["arg"], "https://en.wikipedia.org/wiki/Rust%20%28language%29");
        assert_eq!(item["icon"]["path"], "wiki.png");
        assert!(item["uid"].is_string());
    }

    #[tokio::test]
    async fn test_search_text_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let env: HashMap<String, String> = HashMap::new();
        let source = Fixed(vec!["rust".into(), "rustup".into()]);

        let out = search_impl(&config, "wiki", "rus", true, &source, &env).await.unwrap();
        assert!(out.starts_with("2 result(s) for \"rus\"\n"));
        assert!(out.contains("https://en.wikipedia.org/wiki/rustup"));
    }

    #[tokio::test]
    async fn test_search_propagates_fetch_failure() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let env: HashMap<String, String> = HashMap::new();

        let err = search_impl(&config, "wiki", "rus", false, &Failing, &env).await.unwrap_err();
        assert!(err.to_string().starts_with("HTTP_ERROR: [500]"));
    }
}
