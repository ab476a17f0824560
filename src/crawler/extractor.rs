//! Page fetcher/extractor: one unit of work
//!
//! Fetches a URL, parses it, and turns the page into in-scope outbound links
//! and, for content pages, product records. Frontier membership is checked
//! later by the scheduler when the links are offered, because other units
//! may have changed the frontier in the meantime.

use crate::config::Config;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::{parse_page, PageSelectors};
use crate::output::Record;
use crate::url::{normalize, try_normalize, CanonicalUrl, CrawlScope, PaginationPattern};
use crate::{ConfigError, FetchError, UrlError};
use std::collections::HashSet;
use url::Url;

/// Contribution of one successfully processed page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageOutcome {
    /// In-scope links, canonical, first occurrence order, no repeats
    pub links: Vec<CanonicalUrl>,

    /// Product records in document order; empty for non-content pages
    pub records: Vec<Record>,
}

/// Fetches and extracts pages for the scheduler's workers
pub struct Extractor<F> {
    fetcher: F,
    base: Url,
    scope: CrawlScope,
    pattern: PaginationPattern,
    selectors: PageSelectors,
}

impl<F: Fetcher> Extractor<F> {
    /// Creates an extractor from the run configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Extractor)` - Base URL, pattern and selectors compiled
    /// * `Err(ConfigError)` - One of them is invalid
    pub fn new(fetcher: F, config: &Config) -> Result<Self, ConfigError> {
        let base = Url::parse(&config.crawler.base_url).map_err(|e| {
            ConfigError::InvalidUrl(format!(
                "Invalid base URL '{}': {}",
                config.crawler.base_url, e
            ))
        })?;

        Ok(Self {
            fetcher,
            scope: CrawlScope::new(&base),
            base,
            pattern: PaginationPattern::new(&config.extraction.pagination_pattern)?,
            selectors: PageSelectors::new(&config.extraction)?,
        })
    }

    /// The canonical form of the base URL, which seeds the frontier
    pub fn seed(&self) -> Result<CanonicalUrl, UrlError> {
        try_normalize(self.base.as_str(), &self.base)
    }

    /// The pattern deciding link priority and content pages
    pub fn pattern(&self) -> &PaginationPattern {
        &self.pattern
    }

    /// The prefix every followed link must start with
    pub fn scope(&self) -> &CrawlScope {
        &self.scope
    }

    /// Returns true if products are extracted from this page
    ///
    /// A page is a content page exactly when its own URL is a paginated
    /// listing URL.
    pub fn is_content_page(&self, url: &CanonicalUrl) -> bool {
        self.pattern.is_match(url)
    }

    /// Fetches one URL and extracts its links and records
    ///
    /// # Returns
    ///
    /// * `Ok(PageOutcome)` - The page's contribution
    /// * `Err(FetchError)` - The fetch failed; the page contributes nothing
    pub async fn process(&self, url: &CanonicalUrl) -> Result<PageOutcome, FetchError> {
        let body = self.fetcher.fetch(url.as_str()).await?;
        Ok(self.extract(url, &body))
    }

    /// Extracts links and records from an already fetched body
    pub fn extract(&self, url: &CanonicalUrl, body: &str) -> PageOutcome {
        let parsed = parse_page(body, &self.selectors, self.is_content_page(url));

        let mut seen = HashSet::new();
        let links = parsed
            .hrefs
            .iter()
            .filter_map(|href| normalize(href, &self.base))
            .filter(|link| self.scope.contains(link))
            .filter(|link| seen.insert(link.clone()))
            .collect();

        PageOutcome {
            links,
            records: parsed.products,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoFetch;

    impl Fetcher for NoFetch {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
        }
    }

    fn extractor() -> Extractor<NoFetch> {
        Extractor::new(NoFetch, &Config::default()).unwrap()
    }

    fn url(raw: &str) -> CanonicalUrl {
        let base = Url::parse("https://www.scrapingcourse.com/ecommerce/").unwrap();
        normalize(raw, &base).unwrap()
    }

    #[test]
    fn test_seed_is_canonical_base() {
        let seed = extractor().seed().unwrap();
        assert_eq!(seed.as_str(), "https://www.scrapingcourse.com/ecommerce");
    }

    #[test]
    fn test_links_confined_to_scope() {
        let html = r#"
            <a href="page/2/">2</a>
            <a href="/about/">About</a>
            <a href="https://www.scrapingcourse.com/ecommerce/product/hoodie/">Hoodie</a>
            <a href="https://elsewhere.com/ecommerce/page/2">Elsewhere</a>
        "#;
        let outcome = extractor().extract(&url("/ecommerce/"), html);

        assert_eq!(
            outcome.links,
            vec![url("page/2/"), url("product/hoodie/")]
        );
    }

    #[test]
    fn test_links_kept_when_base_is_not_canonical() {
        for base_url in [
            "https://www.scrapingcourse.com:443/ecommerce/",
            "https://www.scrapingcourse.com/shop/../ecommerce/",
        ] {
            let mut config = Config::default();
            config.crawler.base_url = base_url.to_string();
            let ex = Extractor::new(NoFetch, &config).unwrap();
            let seed = ex.seed().unwrap();

            assert_eq!(ex.scope().prefix(), "https://www.scrapingcourse.com/ecommerce/");
            let outcome = ex.extract(&seed, r#"<a href="page/2/">2</a>"#);
            assert_eq!(outcome.links, vec![url("page/2")], "base {}", base_url);
        }
    }

    #[test]
    fn test_links_deduplicated_within_page() {
        let html = r#"
            <a href="page/2/">2</a>
            <a href="PAGE/2">2 again</a>
            <a href="page/2/#top">2 top</a>
            <a href="page/3/">3</a>
        "#;
        let outcome = extractor().extract(&url("/ecommerce/"), html);
        assert_eq!(outcome.links, vec![url("page/2"), url("page/3")]);
    }

    #[test]
    fn test_relative_links_resolve_against_base() {
        let html = r#"<a href="page/3/">3</a>"#;
        let outcome = extractor().extract(&url("page/2"), html);
        assert_eq!(outcome.links, vec![url("page/3")]);
    }

    #[test]
    fn test_only_paginated_pages_yield_records() {
        let html = r#"
            <li class="product">
              <a class="woocommerce-LoopProduct-link" href="https://www.scrapingcourse.com/ecommerce/product/tee/">
                <h2 class="product-name">Tee</h2>
              </a>
            </li>
        "#;
        let ex = extractor();

        let listing = ex.extract(&url("page/2"), html);
        assert_eq!(listing.records.len(), 1);
        assert_eq!(listing.records[0].name.as_deref(), Some("Tee"));

        let seed = ex.extract(&url("/ecommerce/"), html);
        assert!(seed.records.is_empty());
        assert!(!ex.is_content_page(&url("/ecommerce/")));
    }

    #[tokio::test]
    async fn test_process_propagates_fetch_error() {
        let result = extractor().process(&url("page/2")).await;
        match result {
            Err(FetchError::Status { url, status }) => {
                assert_eq!(status, 404);
                assert_eq!(url, "https://www.scrapingcourse.com/ecommerce/page/2");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = Config::default();
        config.extraction.product_selector = "li[".to_string();
        assert!(Extractor::new(NoFetch, &config).is_err());
    }
}
