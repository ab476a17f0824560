use crate::url::CanonicalUrl;
use crate::ConfigError;
use regex::{Regex, RegexBuilder};

/// Case-insensitive pattern that identifies paginated listing URLs
///
/// A match decides two things: the link is queued ahead of ordinary links,
/// and the page is scraped for product records once fetched.
#[derive(Debug, Clone)]
pub struct PaginationPattern {
    regex: Regex,
}

impl PaginationPattern {
    /// Compiles a pagination pattern
    ///
    /// # Examples
    ///
    /// ```
    /// use paged_harvest::url::PaginationPattern;
    ///
    /// let pattern = PaginationPattern::new(r"page/\d+").unwrap();
    /// assert!(pattern.is_match_str("https://example.com/shop/PAGE/3"));
    /// assert!(!pattern.is_match_str("https://example.com/shop/page/next"));
    /// ```
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| ConfigError::InvalidPattern(e.to_string()))?;
        Ok(Self { regex })
    }

    /// Returns true if the canonical URL is a paginated listing
    pub fn is_match(&self, url: &CanonicalUrl) -> bool {
        self.regex.is_match(url.as_str())
    }

    /// Returns true if an arbitrary string matches the pattern
    pub fn is_match_str(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }

    /// The source of the compiled pattern
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}
