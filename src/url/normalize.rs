use crate::url::CanonicalUrl;
use crate::{UrlError, UrlResult};
use url::Url;

/// Normalizes a raw link reference into its canonical, comparable form
///
/// # Normalization Steps
///
/// 1. Resolve `raw` against `base` (absolute references ignore the base)
/// 2. Reject anything that is not HTTP or HTTPS
/// 3. Drop the fragment
/// 4. Strip trailing path separators; the root path stays `/`
/// 5. Lowercase the whole serialized URL
///
/// Lowercasing also folds path and query segments that a server may treat
/// case-sensitively. Two references differing only in case are treated as
/// the same page.
///
/// # Arguments
///
/// * `raw` - The href as it appeared in the page
/// * `base` - The URL relative references are resolved against
///
/// # Returns
///
/// * `Ok(CanonicalUrl)` - Canonical form of the reference
/// * `Err(UrlError)` - The reference cannot be followed
///
/// # Examples
///
/// ```
/// use paged_harvest::url::try_normalize;
/// use url::Url;
///
/// let base = Url::parse("https://shop.example.com/catalog/").unwrap();
/// let url = try_normalize("Page/2/", &base).unwrap();
/// assert_eq!(url.as_str(), "https://shop.example.com/catalog/page/2");
/// ```
pub fn try_normalize(raw: &str, base: &Url) -> UrlResult<CanonicalUrl> {
    let mut url = base
        .join(raw)
        .map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS links are followed, got: {}",
            url.scheme()
        )));
    }

    url.set_fragment(None);

    let path = url.path();
    let trimmed = path.trim_end_matches('/');
    if trimmed.len() != path.len() {
        let trimmed = if trimmed.is_empty() { "/" } else { trimmed }.to_string();
        url.set_path(&trimmed);
    }

    Ok(CanonicalUrl(url.as_str().to_lowercase()))
}

/// Normalizes a raw link reference, treating failure as "unfollowable"
///
/// The rejected reference is logged at debug level and dropped.
pub fn normalize(raw: &str, base: &Url) -> Option<CanonicalUrl> {
    match try_normalize(raw, base) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::debug!("Dropping link {:?}: {}", raw, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.scrapingcourse.com/ecommerce/").unwrap()
    }

    fn norm(raw: &str) -> String {
        try_normalize(raw, &base()).unwrap().into_string()
    }

    #[test]
    fn test_resolve_relative_path() {
        assert_eq!(
            norm("page/2/"),
            "https://www.scrapingcourse.com/ecommerce/page/2"
        );
    }

    #[test]
    fn test_resolve_root_relative_path() {
        assert_eq!(norm("/about/"), "https://www.scrapingcourse.com/about");
    }

    #[test]
    fn test_absolute_url_ignores_base() {
        assert_eq!(norm("https://other.com/x"), "https://other.com/x");
    }

    #[test]
    fn test_remove_trailing_slash() {
        assert_eq!(
            norm("https://www.scrapingcourse.com/ecommerce/"),
            "https://www.scrapingcourse.com/ecommerce"
        );
    }

    #[test]
    fn test_keep_root_slash() {
        assert_eq!(norm("https://example.com/"), "https://example.com/");
        assert_eq!(norm("https://example.com"), "https://example.com/");
    }

    #[test]
    fn test_collapse_trailing_slash_run() {
        assert_eq!(norm("https://example.com/a//"), "https://example.com/a");
        assert_eq!(norm("https://example.com//"), "https://example.com/");
    }

    #[test]
    fn test_lowercase_everything() {
        assert_eq!(
            norm("HTTPS://Example.COM/Shop/Item?Color=Red"),
            "https://example.com/shop/item?color=red"
        );
    }

    #[test]
    fn test_case_and_slash_variants_collapse() {
        let a = try_normalize("/foo/", &base()).unwrap();
        let b = try_normalize("/FOO", &base()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_query_preserved() {
        assert_eq!(
            norm("/shop/?orderby=price&paged=2"),
            "https://www.scrapingcourse.com/shop?orderby=price&paged=2"
        );
    }

    #[test]
    fn test_fragment_dropped() {
        assert_eq!(
            norm("page/3/#content"),
            "https://www.scrapingcourse.com/ecommerce/page/3"
        );
    }

    #[test]
    fn test_invalid_scheme() {
        let result = try_normalize("mailto:shop@example.com", &base());
        assert!(matches!(result, Err(UrlError::InvalidScheme(_))));

        let result = try_normalize("javascript:void(0)", &base());
        assert!(matches!(result, Err(UrlError::InvalidScheme(_))));
    }

    #[test]
    fn test_malformed_url() {
        let result = try_normalize("http://[::1", &base());
        assert!(matches!(result, Err(UrlError::Parse(_))));
        assert!(normalize("http://[::1", &base()).is_none());
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let inputs = [
            "/",
            "page/2/",
            "/Product/Abominable-Hoodie/",
            "https://EXAMPLE.com/a//",
            "/search?q=Red%20Shirt&Page=2",
            "../../x/y/",
            "https://www.scrapingcourse.com/ecommerce/page/10/#top",
            "caf%C3%A9/",
        ];

        for raw in inputs {
            let once = try_normalize(raw, &base()).unwrap();
            let twice = try_normalize(once.as_str(), &base()).unwrap();
            assert_eq!(once, twice, "normalization not idempotent for {}", raw);
        }
    }
}
