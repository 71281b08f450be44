//! Page fetching over HTTP.
//!
//! The runner only needs "URL in, markup out", so fetching sits behind a
//! trait and the HTTP implementation stays a thin reqwest wrapper. No
//! retries and no backoff: a network failure aborts the run.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{MonitorError, Result};

/// User-Agent announced to monitored sites.
const USER_AGENT: &str = "Mozilla/5.0 (GitHub Actions Ticket Monitor)";

/// Request timeout. Listing pages are small; anything slower than this
/// is treated as a failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches raw page markup for a URL.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page body. Non-success HTTP statuses are errors.
    async fn fetch(&self, url: &str) -> Result<String>;

    /// Fetcher name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}

/// HTTP fetcher using reqwest.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with the monitor's default client settings.
    pub fn new() -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
                .parse()
                .map_err(|e| MonitorError::Client(Box::new(e)))?,
        );
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            "ja,en-US;q=0.7,en;q=0.5"
                .parse()
                .map_err(|e| MonitorError::Client(Box::new(e)))?,
        );

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| MonitorError::Client(Box::new(e)))?;

        Ok(Self { client })
    }

    /// Use a preconfigured HTTP client instead of the default one.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url = %url, "HTTP fetch starting");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "HTTP request failed");
            MonitorError::Fetch {
                url: url.to_string(),
                source: Box::new(e),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MonitorError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(|e| MonitorError::Fetch {
            url: url.to_string(),
            source: Box::new(e),
        })?;

        debug!(url = %url, bytes = body.len(), "HTTP fetch complete");
        Ok(body)
    }

    fn name(&self) -> &str {
        "http"
    }
}
