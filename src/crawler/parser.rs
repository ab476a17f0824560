//! HTML parser for link discovery and product extraction
//!
//! This module handles parsing HTML content to extract:
//! - Raw `href` values of every `<a href>` worth following
//! - Product records from the containers of a listing page

use crate::config::ExtractionConfig;
use crate::output::Record;
use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};

/// Compiles a CSS selector, mapping failures to a configuration error
pub fn compile_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Pre-compiled selectors used on every fetched page
#[derive(Debug, Clone)]
pub struct PageSelectors {
    anchors: Selector,
    product: Selector,
    link: Selector,
    image: Selector,
    name: Selector,
    price: Selector,
}

impl PageSelectors {
    /// Compiles the selectors named in the extraction configuration
    pub fn new(config: &ExtractionConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            anchors: compile_selector("a[href]")?,
            product: compile_selector(&config.product_selector)?,
            link: compile_selector(&config.link_selector)?,
            image: compile_selector(&config.image_selector)?,
            name: compile_selector(&config.name_selector)?,
            price: compile_selector(&config.price_selector)?,
        })
    }
}

/// What one page yields before its links are normalized
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// Raw `href` values in document order
    pub hrefs: Vec<String>,

    /// Product records in document order; empty unless requested
    pub products: Vec<Record>,
}

/// Parses HTML content and extracts hrefs and, optionally, products
///
/// # Link Extraction Rules
///
/// **Include:** every `<a href="...">`
///
/// **Exclude:**
/// - Empty hrefs and fragment-only (same page) anchors
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `selectors` - The compiled page selectors
/// * `with_products` - Whether the page is a content page
///
/// # Example
///
/// ```
/// use paged_harvest::config::ExtractionConfig;
/// use paged_harvest::crawler::{parse_page, PageSelectors};
///
/// let selectors = PageSelectors::new(&ExtractionConfig::default()).unwrap();
/// let html = r#"<html><body><a href="/page/2/">Next</a></body></html>"#;
/// let parsed = parse_page(html, &selectors, false);
/// assert_eq!(parsed.hrefs, vec!["/page/2/".to_string()]);
/// ```
pub fn parse_page(html: &str, selectors: &PageSelectors, with_products: bool) -> ParsedPage {
    let document = Html::parse_document(html);

    let hrefs = extract_hrefs(&document, &selectors.anchors);
    let products = if with_products {
        extract_products(&document, selectors)
    } else {
        Vec::new()
    };

    ParsedPage { hrefs, products }
}

/// Extracts every followable href from the document
fn extract_hrefs(document: &Html, anchors: &Selector) -> Vec<String> {
    document
        .select(anchors)
        .filter_map(|element| element.value().attr("href"))
        .map(str::trim)
        .filter(|href| is_followable(href))
        .map(str::to_string)
        .collect()
}

/// Returns false for hrefs that can never name another page
fn is_followable(href: &str) -> bool {
    if href.is_empty() || href.starts_with('#') {
        return false;
    }

    let lower = href.to_ascii_lowercase();
    !["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
}

/// Builds one record per product container, in document order
fn extract_products(document: &Html, selectors: &PageSelectors) -> Vec<Record> {
    document
        .select(&selectors.product)
        .map(|container| Record {
            url: first_attr(container, &selectors.link, "href"),
            image: first_attr(container, &selectors.image, "src"),
            name: joined_text(container, &selectors.name),
            price: joined_text(container, &selectors.price),
        })
        .collect()
}

/// Attribute of the first matching descendant; empty values count as absent
fn first_attr(container: ElementRef<'_>, selector: &Selector, attr: &str) -> Option<String> {
    container
        .select(selector)
        .next()
        .and_then(|element| element.value().attr(attr))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Trimmed text of all matching descendants; blank text counts as absent
fn joined_text(container: ElementRef<'_>, selector: &Selector) -> Option<String> {
    let text: String = container
        .select(selector)
        .flat_map(|element| element.text())
        .collect();
    let text = text.trim();

    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
