//! URL validation and single-page HTML fetching.
//!
//! The fetcher is the only suspension point of a chunking request. It applies a
//! bounded timeout, sends a fixed User-Agent, performs no retries, and maps every
//! failure onto the transport / upstream-HTTP error classes of [`ChunkerError`].

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use webchunker_shared::{ChunkerError, FetchConfig, Result};

// ---------------------------------------------------------------------------
// URL validation
// ---------------------------------------------------------------------------

/// Parse and validate a caller-supplied URL.
///
/// Accepts only absolute `http`/`https` URLs with a host. Runs before any
/// network access, so an invalid input never reaches the fetcher.
pub fn parse_url(input: &str) -> Result<Url> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ChunkerError::MissingUrl);
    }

    let url = Url::parse(trimmed)
        .map_err(|e| ChunkerError::invalid_input(format!("invalid URL '{trimmed}': {e}")))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ChunkerError::invalid_input(format!(
                "unsupported URL scheme '{other}': expected http or https"
            )));
        }
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(ChunkerError::invalid_input(format!("URL has no host: {url}")));
    }

    Ok(url)
}

// ---------------------------------------------------------------------------
// Fetcher
// ---------------------------------------------------------------------------

/// A successfully fetched HTML page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects.
    pub url: Url,
    /// HTTP status code (always a success code).
    pub status: u16,
    /// `Content-Type` header, if the server sent one.
    pub content_type: Option<String>,
    /// Decoded response body.
    pub html: String,
}

/// HTTP client wrapper that retrieves raw HTML for a single URL.
pub struct Fetcher {
    client: Client,
    timeout: Duration,
}

impl Fetcher {
    /// Create a fetcher with the given configuration.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .timeout(timeout)
            .build()
            .map_err(|e| ChunkerError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, timeout })
    }

    /// Fetch `url` and return its body as text.
    ///
    /// Non-success statuses become [`ChunkerError::Http`]; everything that keeps
    /// the request from completing (DNS, refused connection, timeout, body read)
    /// becomes [`ChunkerError::Network`]. Dropping the returned future aborts
    /// the request.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch(&self, url: &Url) -> Result<FetchedPage> {
        debug!("fetching page");

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| self.transport_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChunkerError::Http {
                url: url.to_string(),
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let html = response
            .text()
            .await
            .map_err(|e| self.transport_error(url, &e))?;

        debug!(
            status = status.as_u16(),
            bytes = html.len(),
            final_url = %final_url,
            "page fetched"
        );

        Ok(FetchedPage {
            url: final_url,
            status: status.as_u16(),
            content_type,
            html,
        })
    }

    fn transport_error(&self, url: &Url, e: &reqwest::Error) -> ChunkerError {
        if e.is_timeout() {
            ChunkerError::Network(format!(
                "{url}: timed out after {}s",
                self.timeout.as_secs()
            ))
        } else {
            ChunkerError::Network(format!("{url}: {e}"))
        }
    }
}
