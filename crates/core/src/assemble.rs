//! Turning raw suggestion words into actionable results.

use serde::{Deserialize, Serialize};

use crate::cache::digest;
use crate::search::{Environment, SearchConfig};

/// Runtime switches that shape the assembled list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultOptions {
    /// Keep words equal to the query and always append the query itself.
    pub include_query: bool,

    /// Tag each suggestion with a uid derived from its action URL so the
    /// host UI keeps positions stable across invocations.
    pub stable_ordering: bool,
}

impl Default for ResultOptions {
    fn default() -> Self {
        Self { include_query: false, stable_ordering: true }
    }
}

/// One actionable suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    pub action_url: String,
    pub subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

/// Outcome of assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assembly {
    Suggestions(Vec<Suggestion>),
    /// Nothing to show; the presentation layer renders a fixed message.
    NoResults,
}

impl Assembly {
    pub fn suggestions(&self) -> &[Suggestion] {
        match self {
            Assembly::Suggestions(items) => items,
            Assembly::NoResults => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions().is_empty()
    }
}

/// Build the final ordered list for `query` from extracted `words`.
///
/// Words equal to the query (ignoring case) are dropped unless
/// `include_query` is set. The query itself is appended last when
/// `include_query` is set or nothing else survived, unless the query is
/// blank.
pub fn assemble(
    search: &SearchConfig, query: &str, words: &[String], options: &ResultOptions, env: &dyn Environment,
) -> Assembly {
    let folded = query.to_lowercase();

    let mut items: Vec<Suggestion> = words
        .iter()
        .filter(|word| options.include_query || word.to_lowercase() != folded)
        .map(|word| suggestion(search, word, options, env))
        .collect();

    if !query.trim().is_empty() && (options.include_query || items.is_empty()) {
        items.push(suggestion(search, query, options, env));
    }

    tracing::debug!(search = %search.uid, raw = words.len(), kept = items.len(), "assembled suggestions");

    if items.is_empty() { Assembly::NoResults } else { Assembly::Suggestions(items) }
}

fn suggestion(search: &SearchConfig, text: &str, options: &ResultOptions, env: &dyn Environment) -> Suggestion {
    let action_url = search.search_url_for(text, env);
    let uid = options.stable_ordering.then(|| digest(&action_url));
    Suggestion { text: text.to_string(), action_url, subtitle: search.title.clone(), uid }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn search() -> SearchConfig {
        SearchConfig {
            uid: "example".into(),
            title: "Example".into(),
            search_url: "https://example.com/s?q={query}".into(),
            ..Default::default()
        }
    }

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn texts(assembly: &Assembly) -> Vec<&str> {
        assembly.suggestions().iter().map(|s| s.text.as_str()).collect()
    }

    const EXCLUDE: ResultOptions = ResultOptions { include_query: false, stable_ordering: false };
    const INCLUDE: ResultOptions = ResultOptions { include_query: true, stable_ordering: false };

    #[test]
    fn test_query_echo_is_dropped() {
        let env: HashMap<String, String> = HashMap::new();
        let result = assemble(&search(), "cat", &words(&["cat", "dog"]), &EXCLUDE, &env);
        assert_eq!(texts(&result), vec!["dog"]);
    }

    #[test]
    fn test_query_echo_is_case_insensitive() {
        let env: HashMap<String, String> = HashMap::new();
        let result = assemble(&search(), "cat", &words(&["CAT", "Cat food"]), &EXCLUDE, &env);
        assert_eq!(texts(&result), vec!["Cat food"]);
    }

    #[test]
    fn test_include_query_keeps_echo_and_appends_query() {
        let env: HashMap<String, String> = HashMap::new();
        let result = assemble(&search(), "cat", &words(&["cat", "dog"]), &INCLUDE, &env);
        assert_eq!(texts(&result), vec!["cat", "dog", "cat"]);
    }

    #[test]
    fn test_empty_words_fall_back_to_query() {
        let env: HashMap<String, String> = HashMap::new();
        for options in [EXCLUDE, INCLUDE] {
            let result = assemble(&search(), "cat", &[], &options, &env);
            assert_eq!(texts(&result), vec!["cat"]);
        }
    }

    #[test]
    fn test_blank_query_without_words_is_no_results() {
        let env: HashMap<String, String> = HashMap::new();
        assert_eq!(assemble(&search(), "  ", &[], &INCLUDE, &env), Assembly::NoResults);
        assert!(assemble(&search(), "", &[], &EXCLUDE, &env).is_empty());
    }

    #[test]
    fn test_only_echo_falls_back_to_query() {
        let env: HashMap<String, String> = HashMap::new();
        let result = assemble(&search(), "cat", &words(&["Cat"]), &EXCLUDE, &env);
        assert_eq!(texts(&result), vec!["cat"]);
    }

    #[test]
    fn test_action_urls_use_search_template() {
        let env: HashMap<String, String> = HashMap::new();
        let search = SearchConfig { suggest_url: "https://suggest.example.com/?q={query}".into(), ..search() };
        let result = assemble(&search, "c", &words(&["cat food", "dog"]), &EXCLUDE, &env);

        let urls: Vec<&str> = result.suggestions().iter().map(|s| s.action_url.as_str()).collect();
        assert_eq!(urls, vec!["https://example.com/s?q=cat+food", "https://example.com/s?q=dog"]);
        assert!(result.suggestions().iter().all(|s| s.subtitle == "Example"));
    }

    #[test]
    fn test_stable_ordering_tags_uids() {
        let env: HashMap<String, String> = HashMap::new();
        let options = ResultOptions { include_query: false, stable_ordering: true };
        let result = assemble(&search(), "c", &words(&["cat"]), &options, &env);

        let item = &result.suggestions()[0];
        assert_eq!(item.uid.as_deref(), Some(digest("https://example.com/s?q=cat").as_str()));

        let unordered = assemble(&search(), "c", &words(&["cat"]), &EXCLUDE, &env);
        assert_eq!(unordered.suggestions()[0].uid, None);
    }

    #[test]
    fn test_stable_uid_is_deterministic() {
        let env: HashMap<String, String> = HashMap::new();
        let options = ResultOptions::default();
        let a = assemble(&search(), "c", &words(&["cat"]), &options, &env);
        let b = assemble(&search(), "c", &words(&["cat"]), &options, &env);
        assert_eq!(a, b);
    }

    #[test]
    fn test_order_is_preserved() {
        let env: HashMap<String, String> = HashMap::new();
        let result = assemble(&search(), "x", &words(&["b", "a", "c", "a"]), &EXCLUDE, &env);
        assert_eq!(texts(&result), vec!["b", "a", "c", "a"]);
    }
}
