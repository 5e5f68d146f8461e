use crate::config::types::{FileConfig, RunConfig};
use crate::config::validation::validate;
use crate::extract::LinkFilter;
use crate::ConfigResult;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads, validates, and compiles a TOML configuration file
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use linkweave::config::load_config;
///
/// let config = load_config(Path::new("crawl.toml")).unwrap();
/// println!("recursive: {}", config.recursive);
/// ```
pub fn load_config(path: &Path) -> ConfigResult<RunConfig> {
    let content = std::fs::read_to_string(path)?;
    let file_config: FileConfig = toml::from_str(&content)?;
    validate(&file_config)?;

    let crawl = file_config.crawl;
    let filter = LinkFilter::compile(&crawl.filters)?;

    Ok(RunConfig {
        recursive: crawl.recursive,
        recursion_limit: crawl.recursion_limit,
        worker_count: crawl.worker_count,
        filter,
    })
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Used to log which configuration a run was started with.
pub fn compute_config_hash(path: &Path) -> ConfigResult<String> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Loads a configuration and returns both the config and its content hash
pub fn load_config_with_hash(path: &Path) -> ConfigResult<(RunConfig, String)> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}
