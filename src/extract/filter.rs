//! Regex filter applied to resolved candidate URLs
//!
//! An empty pattern list accepts everything; otherwise a URL is accepted
//! if at least one pattern matches.

use crate::{ConfigError, ConfigResult};
use regex::Regex;

/// An ordered set of compiled URL patterns
#[derive(Debug, Clone, Default)]
pub struct LinkFilter {
    patterns: Vec<Regex>,
}

impl LinkFilter {
    /// A filter that accepts every URL
    pub fn accept_all() -> Self {
        Self::default()
    }

    /// Compiles a list of regex patterns into a filter
    pub fn compile(patterns: &[String]) -> ConfigResult<Self> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Returns true if the URL passes the filter
    pub fn matches(&self, url: &str) -> bool {
        self.patterns.is_empty() || self.patterns.iter().any(|p| p.is_match(url))
    }

    /// Returns true if no patterns are set
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
