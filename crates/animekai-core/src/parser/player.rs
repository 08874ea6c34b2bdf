//! Embedded player reference extraction
//!
//! An episode page carries at most one supported player iframe. A page
//! without one is an expected outcome, not an error.

use scraper::{Html, Selector};

use crate::url::fix_url;

/// Extracts the embedded player URL from an episode page
///
/// Returns the iframe source normalized to an absolute URL, or `None`
/// when the page has no player element or the element has no source.
pub fn parse_player_url(html: &str, base: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let iframe_sel = Selector::parse("div.video-player iframe").ok()?;

    let src = document
        .select(&iframe_sel)
        .next()?
        .value()
        .attr("src")
        .filter(|s| !s.is_empty())?;

    Some(fix_url(base, src))
}
