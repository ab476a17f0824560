//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - The `Fetcher` seam the scheduler's workers call through
//! - Building the reqwest client from crawler configuration
//! - Mapping transport failures and non-2xx responses to `FetchError`
//!
//! Fetches are never retried.

use crate::config::CrawlerConfig;
use crate::FetchError;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

/// Source of page bodies
///
/// Called once per dequeued URL. Implementations must be shareable across
/// worker tasks.
pub trait Fetcher: Send + Sync + 'static {
    /// Fetches `url` and returns the response body as text
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The crawler configuration (timeout and optional user agent)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use paged_harvest::config::CrawlerConfig;
/// use paged_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true);

    if let Some(agent) = &config.user_agent {
        builder = builder.user_agent(agent.as_str());
    }

    builder.build()
}

/// reqwest-backed [`Fetcher`]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from the crawler configuration
    pub fn new(config: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    /// Wraps an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        fetch_url(&self.client, url).await
    }
}

/// Fetches a URL, treating any non-success status as an error
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | `Ok(body)` |
/// | Other status | `FetchError::Status` |
/// | Connect/timeout/TLS failure | `FetchError::Http` |
/// | Body cannot be decoded | `FetchError::Body` |
pub async fn fetch_url(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().await.map_err(|source| FetchError::Http {
        url: url.to_string(),
        source: source.without_url(),
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| FetchError::Body {
        url: url.to_string(),
        message: e.without_url().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&CrawlerConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_build_http_client_with_user_agent() {
        let config = CrawlerConfig {
            user_agent: Some("HarvestBot/1.0 (+https://example.com/bot)".to_string()),
            ..CrawlerConfig::default()
        };
        assert!(HttpFetcher::new(&config).is_ok());
    }

    #[tokio::test]
    async fn test_connection_refused_is_http_error() {
        let fetcher = HttpFetcher::new(&CrawlerConfig {
            request_timeout_secs: 2,
            ..CrawlerConfig::default()
        })
        .unwrap();

        // Reserve a free port, then release it so nothing is listening
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let url = format!("http://127.0.0.1:{}/", port);
        match fetcher.fetch(&url).await {
            Err(e @ FetchError::Http { .. }) => {
                assert_eq!(e.url(), url);
                assert_eq!(e.to_string().matches(url.as_str()).count(), 1);
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[test]
    fn test_status_error_names_url_once() {
        let e = FetchError::Status {
            url: "https://shop.example.com/catalog/page/2".to_string(),
            status: 500,
        };
        assert_eq!(
            e.to_string(),
            "https://shop.example.com/catalog/page/2 responded with HTTP 500"
        );
    }

    // Status and body handling against a live server is covered with
    // wiremock in tests/crawl_tests.rs
}
