use crate::config::types::FileConfig;
use crate::{ConfigError, ConfigResult};

/// Validates a loaded configuration file
pub fn validate(config: &FileConfig) -> ConfigResult<()> {
    let crawl = &config.crawl;

    if crawl.worker_count < 1 || crawl.worker_count > 64 {
        return Err(ConfigError::Validation(format!(
            "worker-count must be between 1 and 64, got {}",
            crawl.worker_count
        )));
    }

    if crawl.recursive && crawl.recursion_limit < 1 {
        return Err(ConfigError::Validation(
            "recursion-limit must be >= 1 when recursive crawling is enabled".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::CrawlSection;

    fn base_config() -> FileConfig {
        FileConfig {
            crawl: CrawlSection {
                recursive: false,
                recursion_limit: 2,
                worker_count: 4,
                filters: vec![],
            },
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate(&base_config()).is_ok());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut config = base_config();
        config.crawl.worker_count = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_excessive_workers_rejected() {
        let mut config = base_config();
        config.crawl.worker_count = 1000;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_recursive_needs_positive_limit() {
        let mut config = base_config();
        config.crawl.recursive = true;
        config.crawl.recursion_limit = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_limit_fine_when_not_recursive() {
        let mut config = base_config();
        config.crawl.recursion_limit = 0;
        assert!(validate(&config).is_ok());
    }
}
