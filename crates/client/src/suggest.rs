//! Suggest endpoint access.
//!
//! [`SuggestionSource`] is the seam between the pipeline and the network:
//! given a rendered suggest URL and a compiled path, produce the raw words.

use searchio_core::{Error, JsonPath};

use crate::fetch::{FetchClient, FetchConfig};

/// Something that can turn a suggest URL into suggestion words.
#[async_trait::async_trait]
pub trait SuggestionSource: Send + Sync {
    /// Fetch `url` and extract the strings selected by `path`.
    async fn suggestions(&self, url: &str, path: &JsonPath) -> Result<Vec<String>, Error>;
}

/// HTTP-backed [`SuggestionSource`].
#[derive(Debug, Clone)]
pub struct SuggestClient {
    fetch: FetchClient,
}

impl SuggestClient {
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        Ok(Self { fetch: FetchClient::new(config)? })
    }

    pub fn from_fetch_client(fetch: FetchClient) -> Self {
        Self { fetch }
    }
}

#[async_trait::async_trait]
impl SuggestionSource for SuggestClient {
    async fn suggestions(&self, url: &str, path: &JsonPath) -> Result<Vec<String>, Error> {
        let text = self.fetch.fetch_text(url).await?;
        let words = path.extract(text.as_bytes())?;
        tracing::debug!(url, path = path.as_str(), count = words.len(), "extracted suggestions");
        Ok(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use searchio_core::ErrorKind;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn serve(body: &'static str, content_type: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "rust"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, content_type))
            .mount(&server)
            .await;
        server
    }

    fn client() -> SuggestClient {
        SuggestClient::new(FetchConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_opensearch_response() {
        let server = serve(r#"["rust",["rust lang","rustup","rust book"]]"#, "application/x-suggestions+json").await;
        let path = JsonPath::compile("$[1][*]").unwrap();

        let words = client().suggestions(&format!("{}/?q=rust", server.uri()), &path).await.unwrap();
        assert_eq!(words, vec!["rust lang", "rustup", "rust book"]);
    }

    #[tokio::test]
    async fn test_nested_objects_with_descent() {
        let body = r#"[{"phrase":"rust lang"},{"phrase":"rustup","score":3}]"#;
        let server = serve(body, "application/json").await;
        let path = JsonPath::compile("$..phrase").unwrap();

        let words = client().suggestions(&format!("{}/?q=rust", server.uri()), &path).await.unwrap();
        assert_eq!(words, vec!["rust lang", "rustup"]);
    }

    #[tokio::test]
    async fn test_non_string_match_fails() {
        let server = serve(r#"{"suggestions":[1,2]}"#, "application/json").await;
        let path = JsonPath::compile("$.suggestions[*]").unwrap();

        let err = client().suggestions(&format!("{}/?q=rust", server.uri()), &path).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Extraction);
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error() {
        let server = serve("<html>rate limited</html>", "text/html").await;
        let path = JsonPath::compile("$[1][*]").unwrap();

        let err = client().suggestions(&format!("{}/?q=rust", server.uri()), &path).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }
}
