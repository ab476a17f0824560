use crate::config::types::{Config, CrawlerConfig, ExtractionConfig, OutputConfig};
use crate::crawler::compile_selector;
use crate::url::PaginationPattern;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_extraction_config(&config.extraction)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid base URL '{}': {}", config.base_url, e))
    })?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Base URL '{}' must use HTTP or HTTPS",
            config.base_url
        )));
    }

    if config.max_crawl_length < 1 {
        return Err(ConfigError::Validation(format!(
            "max_crawl_length must be >= 1, got {}",
            config.max_crawl_length
        )));
    }

    if config.max_concurrency < 1 || config.max_concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrency must be between 1 and 100, got {}",
            config.max_concurrency
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if let Some(agent) = &config.user_agent {
        if agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "user_agent cannot be blank when set".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates that the pattern and every selector compile
fn validate_extraction_config(config: &ExtractionConfig) -> Result<(), ConfigError> {
    PaginationPattern::new(&config.pagination_pattern)?;

    for selector in [
        &config.product_selector,
        &config.link_selector,
        &config.image_selector,
        &config.name_selector,
        &config.price_selector,
    ] {
        compile_selector(selector)?;
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "csv_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
