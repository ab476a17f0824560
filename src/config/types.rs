use serde::Deserialize;

/// Main configuration structure for Paged-Harvest
///
/// Every section and key is optional; missing values fall back to the
/// defaults of the reference crawl target.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub extraction: ExtractionConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Seed URL; also the string prefix every followed link must start with
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum number of distinct URLs dequeued in one run
    #[serde(rename = "max-crawl-length")]
    pub max_crawl_length: usize,

    /// Maximum number of fetches in flight at once
    #[serde(rename = "max-concurrency")]
    pub max_concurrency: usize,

    /// Whole-request timeout in seconds
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// User agent header; the HTTP client default is used when unset
    #[serde(rename = "user-agent")]
    pub user_agent: Option<String>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.scrapingcourse.com/ecommerce/".to_string(),
            max_crawl_length: 20,
            max_concurrency: 5,
            request_timeout_secs: 30,
            user_agent: None,
        }
    }
}

/// Link prioritization and product extraction rules
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Regular expression (matched case-insensitively) that marks a URL as a
    /// paginated listing; such URLs are crawled first and scraped for products
    #[serde(rename = "pagination-pattern")]
    pub pagination_pattern: String,

    /// Selector for one product container
    #[serde(rename = "product-selector")]
    pub product_selector: String,

    /// Selector (inside a container) whose `href` is the product URL
    #[serde(rename = "link-selector")]
    pub link_selector: String,

    /// Selector (inside a container) whose `src` is the product image
    #[serde(rename = "image-selector")]
    pub image_selector: String,

    /// Selector (inside a container) whose text is the product name
    #[serde(rename = "name-selector")]
    pub name_selector: String,

    /// Selector (inside a container) whose text is the product price
    #[serde(rename = "price-selector")]
    pub price_selector: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            pagination_pattern: r"page/\d+".to_string(),
            product_selector: ".product".to_string(),
            link_selector: ".woocommerce-LoopProduct-link".to_string(),
            image_selector: ".product-image".to_string(),
            name_selector: ".product-name".to_string(),
            price_selector: ".price".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the CSV file written at the end of the run
    #[serde(rename = "csv-path")]
    pub csv_path: String,

    /// Column layout of the CSV file
    pub layout: CsvLayout,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "products.csv".to_string(),
            layout: CsvLayout::default(),
        }
    }
}

/// Column layout of the products CSV
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CsvLayout {
    /// `Url,Image,Name,Price`
    #[default]
    Full,

    /// A single `Url` column, as the legacy exporter wrote it
    UrlOnly,
}
