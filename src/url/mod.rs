//! URL handling module for Paged-Harvest
//!
//! This module provides URL normalization, the crawl scope boundary, and the
//! pagination pattern that drives both link priority and page classification.

mod matcher;
mod normalize;

use std::fmt;
use url::Url;

// Re-export main functions
pub use matcher::PaginationPattern;
pub use normalize::{normalize, try_normalize};

/// The normalized, deduplication-ready form of a URL
///
/// Only produced by [`normalize`]/[`try_normalize`], so two values compare
/// equal exactly when they denote the same page for crawl purposes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalUrl(String);

impl CanonicalUrl {
    /// Returns the canonical URL as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the canonical URL, returning the underlying string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The string prefix that bounds a crawl
///
/// This is a prefix match on the full URL, not a host comparison, so it also
/// confines the crawl to the path subtree of the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlScope {
    prefix: String,
}

impl CrawlScope {
    /// Builds the scope for a parsed base URL
    ///
    /// The prefix is the base's serialization, lowercased, so a default port
    /// or dot segments in the configured text do not keep canonical URLs
    /// from matching.
    pub fn new(base: &Url) -> Self {
        Self {
            prefix: base.as_str().to_lowercase(),
        }
    }

    /// Returns true if the URL lies inside the crawl scope
    pub fn contains(&self, url: &CanonicalUrl) -> bool {
        url.as_str().starts_with(&self.prefix)
    }

    /// The lowercased prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}
