use crate::extract::LinkFilter;
use serde::Deserialize;

/// Configuration for one crawl run, immutable for its duration
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Follow discovered links beyond the seed page
    pub recursive: bool,

    /// Maximum discovery depth; bounds enqueueing, not recording.
    /// Ignored when `recursive` is false.
    pub recursion_limit: u32,

    /// Number of worker threads, must be >= 1
    pub worker_count: usize,

    /// Compiled URL filter; an empty filter accepts every link
    pub filter: LinkFilter,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            recursive: false,
            recursion_limit: 2,
            worker_count: 4,
            filter: LinkFilter::accept_all(),
        }
    }
}

/// On-disk TOML configuration file layout
#[derive(Debug, Clone, Deserialize)]
pub struct FileConfig {
    pub crawl: CrawlSection,
}

/// The `[crawl]` section of a config file
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlSection {
    #[serde(default)]
    pub recursive: bool,

    #[serde(rename = "recursion-limit", default = "default_recursion_limit")]
    pub recursion_limit: u32,

    #[serde(rename = "worker-count", default = "default_worker_count")]
    pub worker_count: usize,

    /// Regex patterns; a link is kept when any pattern matches
    #[serde(default)]
    pub filters: Vec<String>,
}

fn default_recursion_limit() -> u32 {
    2
}

fn default_worker_count() -> usize {
    4
}
