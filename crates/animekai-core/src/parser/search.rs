//! Search results and home page parsers
//!
//! Both page families are built from the same card fragment: a link
//! with a heading, an optional poster image and an optional episode
//! badge.

use scraper::{ElementRef, Html, Selector};

use super::{digits, first_attr, first_text, selector, text_of};
use crate::error::Result;
use crate::types::{HomeSection, SearchResult};
use crate::url::fix_url;

/// Parses a single card-like fragment into a search result
///
/// Returns `None` when the fragment has no title-bearing heading. This
/// is the only validation rule: a missing poster or episode badge still
/// produces a result with those fields absent.
///
/// # Arguments
/// * `element` - Card fragment (an `a.card` or `div.episodes-card` element)
/// * `base` - Site origin used to normalize the card's href
pub fn parse_search_card(element: &ElementRef, base: &str) -> Option<SearchResult> {
    let heading_sel = Selector::parse("h3, h5, h6").ok()?;
    let title = first_text(element, &heading_sel)?;

    let href = element.value().attr("href").unwrap_or_default();
    let url = fix_url(base, href);

    let img_sel = Selector::parse("img").ok()?;
    let poster = first_attr(element, &img_sel, "src");

    let badge_sel = Selector::parse("div.episode").ok()?;
    let sub_count = element
        .select(&badge_sel)
        .next()
        .and_then(|el| digits(&text_of(&el)));

    Some(SearchResult {
        title,
        url,
        poster,
        sub_count,
    })
}

/// Parses a search results page into a list of results
///
/// Cards that fail [`parse_search_card`] are skipped; their siblings
/// keep processing.
pub fn parse_search_results(html: &str, base: &str) -> Result<Vec<SearchResult>> {
    let document = Html::parse_document(html);
    let card_sel = selector("div.row a.card")?;

    Ok(document
        .select(&card_sel)
        .filter_map(|el| parse_search_card(&el, base))
        .collect())
}

/// Parses the home page into its named sections
///
/// Two sections are known: featured episode cards, and the popular
/// grid that follows the "Popular" heading card. Sections that come
/// out empty are omitted.
pub fn parse_home_sections(html: &str, base: &str) -> Result<Vec<HomeSection>> {
    let document = Html::parse_document(html);
    let mut sections = Vec::new();

    let featured_sel = selector("div.episodes-card")?;
    let featured: Vec<SearchResult> = document
        .select(&featured_sel)
        .filter_map(|el| parse_search_card(&el, base))
        .collect();
    if !featured.is_empty() {
        sections.push(HomeSection {
            title: "Featured Episodes".to_string(),
            items: featured,
        });
    }

    let popular = parse_popular_section(&document, base)?;
    if !popular.is_empty() {
        sections.push(HomeSection {
            title: "Popular Anime".to_string(),
            items: popular,
        });
    }

    Ok(sections)
}

/// Collects the cards of the row following the "Popular" heading card
///
/// The heading and its grid are sibling elements, so this scans every
/// `div.card` for the heading text and then walks to the next `div.row`
/// sibling.
fn parse_popular_section(document: &Html, base: &str) -> Result<Vec<SearchResult>> {
    let card_sel = selector("div.card")?;
    let h3_sel = selector("h3")?;
    let link_sel = selector("a.card")?;

    let mut items = Vec::new();

    for card in document.select(&card_sel) {
        let is_popular_heading = card
            .select(&h3_sel)
            .any(|h| text_of(&h).contains("Popular"));
        if !is_popular_heading {
            continue;
        }

        if let Some(row) = next_element_sibling(&card)
            && has_class(&row, "row")
        {
            items.extend(
                row.select(&link_sel)
                    .filter_map(|el| parse_search_card(&el, base)),
            );
        }
    }

    Ok(items)
}

/// First following sibling that is an element node
fn next_element_sibling<'a>(element: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

fn has_class(element: &ElementRef, class: &str) -> bool {
    element
        .value()
        .attr("class")
        .is_some_and(|c| c.split_whitespace().any(|name| name == class))
}
