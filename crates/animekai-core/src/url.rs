//! URL helpers for animekai.com
//!
//! Provides the site constants, relative-href normalization and the
//! search URL builder.

/// Canonical site origin
pub const BASE_URL: &str = "https://animekai.com";

/// Provider name used to label resolved links
pub const SITE_NAME: &str = "Animekai";

/// Normalizes an href extracted from a page against a base origin
///
/// Absolute URLs pass through unchanged, protocol-relative URLs get an
/// `https:` scheme, and path-relative URLs are joined onto `base`.
///
/// # Arguments
/// * `base` - Site origin without a trailing slash (e.g. [`BASE_URL`])
/// * `href` - Raw href attribute value from the document
///
/// # Example
/// ```
/// use animekai_core::url::{fix_url, BASE_URL};
/// assert_eq!(fix_url(BASE_URL, "/watch/naruto"), "https://animekai.com/watch/naruto");
/// assert_eq!(fix_url(BASE_URL, "//streamtape.com/e/abc"), "https://streamtape.com/e/abc");
/// ```
pub fn fix_url(base: &str, href: &str) -> String {
    if href.is_empty() {
        return base.to_string();
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    if let Some(rest) = href.strip_prefix("//") {
        return format!("https://{}", rest);
    }
    if href.starts_with('/') {
        format!("{}{}", base, href)
    } else {
        format!("{}/{}", base, href)
    }
}

/// Builds the search path for a given query
///
/// URL-encodes the query into the `q` parameter of the site's search
/// endpoint. The returned path is relative so it can be fetched against
/// any configured base origin.
///
/// # Example
/// ```
/// use animekai_core::url::build_search_path;
/// assert_eq!(build_search_path("sword art online"), "/search?q=sword%20art%20online");
/// ```
pub fn build_search_path(query: &str) -> String {
    format!("/search?q={}", urlencoding::encode(query))
}
