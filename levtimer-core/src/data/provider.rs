//! Fetch collaborator trait and structured error types.
//!
//! The `Fetcher` trait abstracts over where raw CSV text comes from (HTTP,
//! local files, scripted responses in tests) so the orchestrator never
//! touches the network directly.

use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from retrieving a raw document.
///
/// These are designed to be displayable in CLI output verbatim.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("network error for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no document for {url}")]
    NotFound { url: String },
}

/// Source of raw CSV documents keyed by URL (or path).
pub trait Fetcher {
    /// Human-readable name of this fetcher.
    fn name(&self) -> &str;

    /// Retrieve the document at `url` as text.
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url)
    }
}

/// Reads documents from the local filesystem; the "url" is a path.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFetcher;

impl Fetcher for FileFetcher {
    fn name(&self) -> &str {
        "file"
    }

    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let path = url.strip_prefix("file://").unwrap_or(url);
        std::fs::read_to_string(path).map_err(|source| FetchError::Io {
            path: PathBuf::from(path),
            source,
        })
    }
}

/// Serves fixed documents from memory. Unknown URLs fail with `NotFound`.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    documents: HashMap<String, String>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.documents.insert(url.into(), body.into());
        self
    }
}

impl Fetcher for StaticFetcher {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                url: url.to_string(),
            })
    }
}
