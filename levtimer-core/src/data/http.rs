//! HTTP fetcher backed by a blocking reqwest client.
//!
//! One plain GET per document, no body and no authentication. Retries are the
//! caller's business (an explicit refresh), so a failure is returned as-is.

use std::time::Duration;
use tracing::{debug, info};

use super::provider::{FetchError, Fetcher, FileFetcher};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Fetches CSV documents over HTTP(S).
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Build a fetcher whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Transport {
                url: String::new(),
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        info!(url, "fetching");
        let transport = |e: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };

        let resp = self.client.get(url).send().map_err(transport)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp.text().map_err(transport)?;
        debug!(url, bytes = body.len(), "fetched");
        Ok(body)
    }
}

/// Sends `http://` and `https://` URLs over the network and treats anything
/// else as a local path.
pub struct RoutingFetcher {
    http: HttpFetcher,
}

impl RoutingFetcher {
    pub fn new(http: HttpFetcher) -> Self {
        Self { http }
    }

    fn is_remote(url: &str) -> bool {
        url.starts_with("http://") || url.starts_with("https://")
    }
}

impl Fetcher for RoutingFetcher {
    fn name(&self) -> &str {
        "routing"
    }

    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        if Self::is_remote(url) {
            self.http.fetch(url)
        } else {
            FileFetcher.fetch(url)
        }
    }
}
