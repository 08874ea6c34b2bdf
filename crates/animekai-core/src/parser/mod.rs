//! HTML parsers for animekai.com pages
//!
//! Pure transformations over already-fetched documents. Each submodule
//! covers one page family.

pub mod detail;
pub mod player;
pub mod search;

pub use detail::parse_detail;
pub use player::parse_player_url;
pub use search::{parse_home_sections, parse_search_results};

use scraper::{ElementRef, Selector};

use crate::error::{AnimekaiError, Result};

/// Parses a CSS selector, mapping failure into a parse error
pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| AnimekaiError::Parse(format!("Invalid selector {:?}: {:?}", css, e)))
}

/// Collects and trims the text content of an element
pub(crate) fn text_of(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Trimmed text of the first element matching `sel`, if any is non-empty
pub(crate) fn first_text(element: &ElementRef, sel: &Selector) -> Option<String> {
    element
        .select(sel)
        .next()
        .map(|el| text_of(&el))
        .filter(|t| !t.is_empty())
}

/// Attribute of the first element matching `sel`
pub(crate) fn first_attr(element: &ElementRef, sel: &Selector, attr: &str) -> Option<String> {
    element
        .select(sel)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(|v| v.to_string())
}

/// Parses the concatenated digits of a text, e.g. "Episode 12" -> 12
pub(crate) fn digits(text: &str) -> Option<u32> {
    let filtered: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    filtered.parse().ok()
}
