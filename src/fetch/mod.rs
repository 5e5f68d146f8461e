//! HTTP fetching for the crawl workers
//!
//! Workers are plain OS threads, so fetching uses the blocking reqwest
//! client. The engine only depends on the [`Fetcher`] trait; the concrete
//! [`HttpFetcher`] lives here as glue.

use reqwest::blocking::Client;
use std::time::Duration;
use thiserror::Error;

/// Errors from a single fetch attempt.
///
/// All variants are per-item and non-fatal to a run: the worker logs them,
/// counts the item as processed, and moves on.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {code} for {url}")]
    Status { url: String, code: u16 },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },
}

/// A synchronous page fetcher.
///
/// Implementations must be safe to call from multiple worker threads at
/// once. Any non-success status is an error.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Fetcher backed by a blocking reqwest client
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client()?,
        })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                code: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

        Ok(body.to_vec())
    }
}

/// Builds the blocking HTTP client shared by all workers
///
/// The overall request timeout is what bounds `stop()` latency: a stop
/// request cannot outwait a fetch longer than this.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("linkweave/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}
