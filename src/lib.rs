//! Linkweave: a concurrent breadth-first link discovery crawler
//!
//! This crate fetches a seed page, extracts its anchor targets, and can
//! follow them breadth-first up to a configurable depth using a pool of
//! worker threads that share one deduplicating frontier queue.

pub mod config;
pub mod engine;
pub mod extract;
pub mod fetch;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for crawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("a crawl is already running")]
    AlreadyRunning,

    #[error("invalid seed URL: {0}")]
    InvalidSeed(String),

    #[error("failed to spawn {what} thread: {source}")]
    Spawn {
        what: &'static str,
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("invalid filter pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::RunConfig;
pub use engine::{CrawlStats, DiscoveredLink, RunHandle};
pub use extract::{Extractor, HtmlExtractor, LinkFilter};
pub use fetch::{FetchError, Fetcher, HttpFetcher};
