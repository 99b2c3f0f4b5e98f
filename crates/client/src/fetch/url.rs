//! Validation of rendered suggest endpoint URLs.

/// Error type for endpoint URL validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Parse a rendered suggest URL, accepting only absolute `http`/`https` URLs.
///
/// Unlike user-typed addresses there is no scheme defaulting: a template
/// without a scheme is a configuration mistake and is reported as such.
/// The query string is kept byte-for-byte so pre-escaped values survive.
pub fn parse_endpoint(input: &str) -> Result<url::Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let mut parsed = url::Url::parse(trimmed).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    parsed.set_fragment(None);

    Ok(parsed)
}
