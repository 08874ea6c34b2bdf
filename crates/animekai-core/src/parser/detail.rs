//! Detail page parser
//!
//! Extracts the anime record and its episode list from a detail page.

use scraper::{ElementRef, Html};

use super::{digits, first_attr, first_text, selector, text_of};
use crate::error::Result;
use crate::types::{AnimeDetail, ContentKind, Episode};
use crate::url::fix_url;

/// Parses a detail page into an [`AnimeDetail`]
///
/// A missing heading is not a failure: the title defaults to the empty
/// string and the record classifies as a series. Episodes come out in
/// ascending order even though the page lists newest first.
pub fn parse_detail(html: &str, base: &str) -> Result<AnimeDetail> {
    let document = Html::parse_document(html);

    let title_sel = selector("h1.title")?;
    let title = document
        .select(&title_sel)
        .next()
        .map(|el| text_of(&el))
        .unwrap_or_default();

    let poster_sel = selector("div.anime-poster img")?;
    let poster = document
        .select(&poster_sel)
        .next()
        .and_then(|el| el.value().attr("src"))
        .map(|s| s.to_string());

    let description_sel = selector("div.anime-description")?;
    let description = document
        .select(&description_sel)
        .next()
        .map(|el| text_of(&el))
        .filter(|t| !t.is_empty());

    let kind = ContentKind::classify(&title);
    let episodes = parse_episode_list(&document, base)?;

    Ok(AnimeDetail {
        title,
        poster,
        description,
        kind,
        episodes,
    })
}

/// Parses the episode listing of a detail page
///
/// Every link fragment produces a record; missing names, numbers or
/// thumbnails stay absent rather than failing the fragment. The site
/// lists episodes newest-first, so the collected sequence is reversed
/// before returning.
fn parse_episode_list(document: &Html, base: &str) -> Result<Vec<Episode>> {
    let link_sel = selector("div.episode-list a")?;

    let mut episodes: Vec<Episode> = document
        .select(&link_sel)
        .map(|el| parse_episode(&el, base))
        .collect();
    episodes.reverse();

    Ok(episodes)
}

fn parse_episode(element: &ElementRef, base: &str) -> Episode {
    let href = element.value().attr("href").unwrap_or_default();
    let url = fix_url(base, href);

    let name_sel = selector("div.episode-name").ok();
    let name = name_sel.and_then(|sel| first_text(element, &sel));

    let number_sel = selector("div.episode-number").ok();
    let number = number_sel
        .and_then(|sel| first_text(element, &sel))
        .and_then(|text| digits(&text));

    let img_sel = selector("img").ok();
    let thumbnail = img_sel.and_then(|sel| first_attr(element, &sel, "src"));

    Episode {
        url,
        name,
        number,
        thumbnail,
        season: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url::BASE_URL;

    const DETAIL_HTML: &str = r#"
    <html><body>
    <h1 class="title">Sword Art Online</h1>
    <div class="anime-poster"><img src="/img/sao.jpg"></div>
    <div class="anime-description">Kirito is trapped in a virtual MMO.</div>
    <div class="episode-list">
        <a href="/watch/sao-3">
            <div class="episode-name">The Black Swordsman</div>
            <div class="episode-number">Episode 3</div>
            <img src="/thumb/3.jpg">
        </a>
        <a href="/watch/sao-2">
            <div class="episode-name">Beater</div>
            <div class="episode-number">Episode 2</div>
            <img src="/thumb/2.jpg">
        </a>
        <a href="/watch/sao-1">
            <div class="episode-name">The World of Swords</div>
            <div class="episode-number">Episode 1</div>
            <img src="/thumb/1.jpg">
        </a>
    </div>
    </body></html>
    "#;

    #[test]
    fn test_parse_detail_fields() {
        let detail = parse_detail(DETAIL_HTML, BASE_URL).unwrap();

        assert_eq!(detail.title, "Sword Art Online");
        assert_eq!(detail.poster, Some("/img/sao.jpg".to_string()));
        assert_eq!(
            detail.description,
            Some("Kirito is trapped in a virtual MMO.".to_string())
        );
        assert_eq!(detail.kind, ContentKind::Series);
    }

    #[test]
    fn test_parse_detail_reverses_episode_order() {
        // Page lists [3, 2, 1]; output must be [1, 2, 3]
        let detail = parse_detail(DETAIL_HTML, BASE_URL).unwrap();

        let numbers: Vec<Option<u32>> = detail.episodes.iter().map(|e| e.number).collect();
        assert_eq!(numbers, vec![Some(1), Some(2), Some(3)]);
        assert_eq!(detail.episodes[0].url, "https://animekai.com/watch/sao-1");
        assert_eq!(detail.episodes[2].url, "https://animekai.com/watch/sao-3");
    }

    #[test]
    fn test_parse_detail_episode_fields() {
        let detail = parse_detail(DETAIL_HTML, BASE_URL).unwrap();

        let first = &detail.episodes[0];
        assert_eq!(first.name, Some("The World of Swords".to_string()));
        assert_eq!(first.thumbnail, Some("/thumb/1.jpg".to_string()));
        assert_eq!(first.season, 1);
    }

    #[test]
    fn test_parse_detail_movie_classification() {
        let html = r#"
        <html><body>
        <h1 class="title">Sword Art Online Movie: Ordinal Scale</h1>
        <div class="episode-list"></div>
        </body></html>
        "#;

        let detail = parse_detail(html, BASE_URL).unwrap();
        assert_eq!(detail.kind, ContentKind::Movie);
    }

    #[test]
    fn test_parse_detail_missing_title_defaults_empty() {
        let html = "<html><body><div class='episode-list'></div></body></html>";

        let detail = parse_detail(html, BASE_URL).unwrap();
        assert_eq!(detail.title, "");
        assert_eq!(detail.kind, ContentKind::Series);
        assert!(detail.episodes.is_empty());
    }

    #[test]
    fn test_parse_episode_without_number_or_thumbnail() {
        let html = r#"
        <html><body>
        <h1 class="title">Specials</h1>
        <div class="episode-list">
            <a href="/watch/special"><div class="episode-name">OVA</div></a>
        </div>
        </body></html>
        "#;

        let detail = parse_detail(html, BASE_URL).unwrap();
        assert_eq!(detail.episodes.len(), 1);

        let episode = &detail.episodes[0];
        assert_eq!(episode.name, Some("OVA".to_string()));
        assert_eq!(episode.number, None);
        assert_eq!(episode.thumbnail, None);
        assert_eq!(episode.url, "https://animekai.com/watch/special");
    }

    #[test]
    fn test_parse_detail_is_idempotent() {
        let first = parse_detail(DETAIL_HTML, BASE_URL).unwrap();
        let second = parse_detail(DETAIL_HTML, BASE_URL).unwrap();
        assert_eq!(first, second);
    }
}
