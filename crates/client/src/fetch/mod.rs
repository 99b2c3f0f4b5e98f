//! HTTP fetch pipeline for suggest endpoints.
//!
//! ### Timeouts
//! Fixed constants sized for an interactive, query-as-you-type client:
//! - Connection setup (dial + TLS): [`CONNECT_TIMEOUT`]
//! - Request sent to response headers received:
//!   [`TLS_HANDSHAKE_TIMEOUT`] + [`RESPONSE_HEADER_TIMEOUT`]
//! - Wait for each body chunk: [`FIRST_BYTE_TIMEOUT`]
//!
//! A timeout is an ordinary network failure.
//!
//! ### Safety Gates
//! - `http`/`https` URLs only
//! - Max redirects: 5
//! - Max body bytes: 5MB (configurable), checked against the declared
//!   length and again while streaming
//!
//! ### Charset
//! Bodies are normalized to UTF-8 by [`charset::decode_body`].

pub mod charset;
pub mod url;

use bytes::{Bytes, BytesMut};
use reqwest::Url;
use reqwest::{Client, StatusCode, header};
use std::time::{Duration, Instant};

pub use charset::{CharsetError, decode_body};
pub use url::{UrlError, parse_endpoint};

use searchio_core::Error;

/// Dial timeout, also used as the TCP keep-alive interval.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(60);
pub const KEEP_ALIVE: Duration = Duration::from_secs(60);
pub const TLS_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(30);
pub const RESPONSE_HEADER_TIMEOUT: Duration = Duration::from_secs(30);
/// Longest wait for the next body chunk.
pub const FIRST_BYTE_TIMEOUT: Duration = Duration::from_secs(10);

const MAX_REDIRECTS: usize = 5;
const ACCEPT: &str = "application/json, text/javascript;q=0.9, */*;q=0.8";

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "searchio/0.1")
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 5MB)
    pub max_bytes: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { user_agent: "searchio/0.1".to_string(), max_bytes: 5 * 1024 * 1024 }
    }
}

impl From<&searchio_core::AppConfig> for FetchConfig {
    fn from(config: &searchio_core::AppConfig) -> Self {
        Self { user_agent: config.user_agent.clone(), max_bytes: config.max_bytes }
    }
}

/// Response from a fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// The URL requested
    pub url: Url,
    /// The final URL after redirects
    pub final_url: Url,
    /// HTTP status code
    pub status: StatusCode,
    /// Content-Type header
    pub content_type: Option<String>,
    /// Response body bytes
    pub bytes: Bytes,
    /// Time taken to fetch in milliseconds
    pub fetch_ms: u64,
}

impl FetchResponse {
    /// Body decoded to UTF-8 text.
    pub fn text(&self) -> Result<String, Error> {
        decode_body(self.content_type.as_deref(), &self.bytes)
            .map_err(|e| Error::Decode(format!("{}: {e}", self.final_url)))
    }
}

/// HTTP client for suggest endpoints.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(CONNECT_TIMEOUT)
            .tcp_keepalive(KEEP_ALIVE)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Fetch a URL, returning raw bytes and metadata.
    ///
    /// Non-2xx responses are `Error::HttpStatus`; bodies over the byte limit
    /// are `Error::FetchTooLarge`.
    pub async fn fetch(&self, url_str: &str) -> Result<FetchResponse, Error> {
        let start = Instant::now();
        let url = parse_endpoint(url_str).map_err(|e| Error::InvalidUrl(format!("{url_str:?}: {e}")))?;

        tracing::debug!(url = %url, "fetching");

        let request = self.http.get(url.clone()).header(header::ACCEPT, ACCEPT);

        let header_deadline = TLS_HANDSHAKE_TIMEOUT + RESPONSE_HEADER_TIMEOUT;
        let mut response = tokio::time::timeout(header_deadline, request.send())
            .await
            .map_err(|_| Error::Network(format!("{url}: no response within {}s", header_deadline.as_secs())))?
            .map_err(|e| network_error(&url, e))?;

        let status = response.status();

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("Unknown Status").to_string();
            tracing::debug!(url = %url, status = status.as_u16(), "endpoint returned error status");
            return Err(Error::HttpStatus { status: status.as_u16(), reason });
        }

        if let Some(len) = response.content_length()
            && len > self.config.max_bytes as u64
        {
            return Err(Error::FetchTooLarge(format!("{} bytes exceeds {}", len, self.config.max_bytes)));
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let mut body = BytesMut::new();
        loop {
            let chunk = tokio::time::timeout(FIRST_BYTE_TIMEOUT, response.chunk())
                .await
                .map_err(|_| Error::Network(format!("{url}: body stalled for {}s", FIRST_BYTE_TIMEOUT.as_secs())))?
                .map_err(|e| network_error(&url, e))?;
            let Some(chunk) = chunk else { break };

            if body.len() + chunk.len() > self.config.max_bytes {
                return Err(Error::FetchTooLarge(format!(
                    "more than {} bytes from {}",
                    self.config.max_bytes, final_url
                )));
            }
            body.extend_from_slice(&chunk);
        }
        let bytes = body.freeze();

        let fetch_ms = start.elapsed().as_millis() as u64;

        tracing::debug!("fetched {} -> {} in {}ms ({} bytes)", url, final_url, fetch_ms, bytes.len());
        tracing::trace!(body = %String::from_utf8_lossy(&bytes), "response body");

        Ok(FetchResponse { url, final_url, status, content_type, bytes, fetch_ms })
    }

    /// Fetch a URL and decode its body to text.
    pub async fn fetch_text(&self, url_str: &str) -> Result<String, Error> {
        self.fetch(url_str).await?.text()
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

fn network_error(url: &Url, err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Network(format!("{url}: timed out: {err}"))
    } else {
        Error::Network(format!("{url}: {err}"))
    }
}
