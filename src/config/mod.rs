//! Configuration module
//!
//! A run is configured either programmatically through [`RunConfig`] or by
//! loading a TOML file with [`load_config`].
//!
//! # Example
//!
//! ```no_run
//! use linkweave::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawl.toml")).unwrap();
//! println!("workers: {}", config.worker_count);
//! ```

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{CrawlSection, FileConfig, RunConfig};
pub use validation::validate;
