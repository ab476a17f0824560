use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigResult;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Parses TOML configuration content without validating it
///
/// Callers that layer command-line overrides on top of a file use this and
/// run [`validate`] once the overrides are applied.
pub fn parse_config(content: &str) -> ConfigResult<Config> {
    Ok(toml::from_str(content)?)
}

/// Loads, parses and validates a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use paged_harvest::config::load_config;
///
/// let config = load_config(Path::new("harvest.toml")).unwrap();
/// println!("Base URL: {}", config.crawler.base_url);
/// ```
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Reads a configuration file and returns the unvalidated config and the
/// hex SHA-256 of its content
///
/// The hash is logged at startup so that two runs can be told apart by their
/// settings.
pub fn load_config_with_hash(path: &Path) -> ConfigResult<(Config, String)> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, hash_content(&content)))
}

fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CsvLayout;
    use crate::ConfigError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[crawler]
base-url = "https://shop.example.com/catalog/"
max-crawl-length = 50
max-concurrency = 8

[extraction]
pagination-pattern = "p/\\d+"
product-selector = "li.item"

[output]
csv-path = "./out.csv"
layout = "url-only"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.base_url, "https://shop.example.com/catalog/");
        assert_eq!(config.crawler.max_crawl_length, 50);
        assert_eq!(config.crawler.max_concurrency, 8);
        assert_eq!(config.extraction.pagination_pattern, r"p/\d+");
        assert_eq!(config.extraction.product_selector, "li.item");
        // Untouched keys keep their defaults
        assert_eq!(config.extraction.price_selector, ".price");
        assert_eq!(config.output.csv_path, "./out.csv");
        assert_eq!(config.output.layout, CsvLayout::UrlOnly);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();

        assert_eq!(
            config.crawler.base_url,
            "https://www.scrapingcourse.com/ecommerce/"
        );
        assert_eq!(config.crawler.max_crawl_length, 20);
        assert_eq!(config.crawler.max_concurrency, 5);
        assert_eq!(config.output.csv_path, "products.csv");
        assert_eq!(config.output.layout, CsvLayout::Full);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/harvest.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[crawler]
max-concurrency = 0
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_unknown_layout_rejected() {
        let result = parse_config("[output]\nlayout = \"sideways\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_hash_skips_validation() {
        let file = create_temp_config("[crawler]\nmax-crawl-length = 0\n");
        let (config, hash) = load_config_with_hash(file.path()).unwrap();

        assert_eq!(config.crawler.max_crawl_length, 0);
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn test_hash_tracks_content() {
        let a = create_temp_config("[crawler]\nmax-crawl-length = 10\n");
        let b = create_temp_config("[crawler]\nmax-crawl-length = 11\n");

        let (_, hash_a) = load_config_with_hash(a.path()).unwrap();
        let (_, hash_a_again) = load_config_with_hash(a.path()).unwrap();
        let (_, hash_b) = load_config_with_hash(b.path()).unwrap();

        assert_eq!(hash_a, hash_a_again);
        assert_ne!(hash_a, hash_b);
    }
}
