//! HTTP fetcher implementation
//!
//! This module performs the outbound GET for a saved query:
//! - Building the HTTP client with the configured timeout and user agent
//! - Fetching the raw document body
//! - Folding every transport failure into a typed [`FetchError`]
//! - An offline mode that returns a synthetic document without network access

use crate::config::FetcherConfig;
use crate::query::fragment::escape_html;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Listing id used in synthetic offline documents
const SYNTHETIC_PID: &str = "6744258112";

/// Errors that can occur while fetching a query URL
#[derive(Debug, Error)]
pub enum FetchError {
    /// Upstream did not answer in time or could not be reached at all
    #[error("TIMEOUT fetching {url} ({reason})")]
    Timeout { url: String, reason: String },

    #[error("invalid URL {url} ({reason})")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to read body from {url} ({reason})")]
    Body { url: String, reason: String },
}

impl FetchError {
    /// The URL that failed
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url, .. } | Self::InvalidUrl { url, .. } | Self::Body { url, .. } => {
                url.as_str()
            }
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use column_scout::config::FetcherConfig;
/// use column_scout::query::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_millis(config.timeout_ms))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Deterministic stand-in document used when the fetcher runs offline
pub fn synthetic_document(url: &str) -> String {
    format!(
        r#"<html><body><ul><li class="result-row" data-pid="{}"> Wow cool {} </li></ul></body></html>"#,
        SYNTHETIC_PID,
        escape_html(url)
    )
}

/// Bounded-time document fetcher
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    offline: bool,
}

impl Fetcher {
    /// Creates a fetcher from configuration
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            offline: config.offline,
        })
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }

    /// Fetches `url` and returns the raw body
    ///
    /// Non-success status codes are not errors: their bodies are returned as-is
    /// so the extractor decides whether any results are present.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Document body
    /// * `Err(FetchError::Timeout)` - Timed out, refused, or otherwise unreachable
    /// * `Err(FetchError::InvalidUrl)` - `url` is not an absolute URL
    /// * `Err(FetchError::Body)` - Response body could not be decoded
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        if self.offline {
            tracing::debug!("Offline fetch for {}", url);
            return Ok(synthetic_document(url));
        }

        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        tracing::info!("Fetching {}", url);

        let response = self.client.get(parsed).send().await.map_err(|e| {
            tracing::warn!("TIMEOUT: {} ({})", url, e);
            FetchError::Timeout {
                url: url.to_string(),
                reason: describe_transport_error(&e),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Upstream returned {} for {}", status, url);
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                    reason: describe_transport_error(&e),
                }
            } else {
                FetchError::Body {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        tracing::debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

fn describe_transport_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        "connection failed".to_string()
    } else {
        error.to_string()
    }
}
