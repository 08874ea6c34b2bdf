//! Core data types for the animekai scraper
//!
//! Contains the value objects reported to the host application. All of
//! them are request-scoped: constructed fresh per call, no identity
//! beyond their field values.

use serde::{Deserialize, Serialize};

/// A single search result card
///
/// Produced by parsing a card-like fragment from search results or a
/// home page section. Cards without a title-bearing heading are
/// discarded during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Anime title
    pub title: String,

    /// Absolute URL of the detail page
    pub url: String,

    /// Poster image URL, if the card carries one
    pub poster: Option<String>,

    /// Subbed episode count from the card's episode badge
    pub sub_count: Option<u32>,
}

/// A single episode entry from a detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Absolute URL of the episode page
    pub url: String,

    /// Display name, if the listing carries one
    pub name: Option<String>,

    /// Episode number parsed from the listing
    pub number: Option<u32>,

    /// Thumbnail image URL
    pub thumbnail: Option<String>,

    /// Season number; the site does not expose seasons, so this is always 1
    pub season: u32,
}

/// Content classification derived from the title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentKind {
    Series,
    Movie,
}

impl ContentKind {
    /// Classifies a title by a case-insensitive "movie" substring check
    ///
    /// This is a heuristic, not a guarantee: a series whose title
    /// happens to contain the word is classified as a movie.
    pub fn classify(title: &str) -> Self {
        if title.to_lowercase().contains("movie") {
            ContentKind::Movie
        } else {
            ContentKind::Series
        }
    }
}

/// Full detail record for one anime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimeDetail {
    /// Title; empty string when the detail page has no heading
    pub title: String,

    /// Poster image URL
    pub poster: Option<String>,

    /// Plot description
    pub description: Option<String>,

    /// Series/movie classification
    pub kind: ContentKind,

    /// Episodes in ascending order (earliest first)
    pub episodes: Vec<Episode>,
}

/// A named home page section with its result cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeSection {
    /// Section heading, e.g. "Featured Episodes"
    pub title: String,

    /// Cards listed in the section
    pub items: Vec<SearchResult>,
}

/// Video quality tag attached to a resolved link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Quality {
    #[default]
    Unknown,
    P360,
    P480,
    P720,
    P1080,
}

/// A resolved, playable video link
///
/// Emitted through a link sink, never collected into a return value: a
/// single episode page may yield several renditions from a delegated
/// resolver, and the host expects incremental delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoLink {
    /// Display label shown to the user
    pub name: String,

    /// Origin label identifying the providing source
    pub source: String,

    /// Direct or embeddable media URL
    pub url: String,

    /// Referer to send when fetching the media URL
    pub referer: String,

    /// Quality tag; `Unknown` when the source does not state one
    pub quality: Quality,

    /// Whether `url` points at an embed page rather than a media file
    pub is_embed: bool,
}

/// A subtitle track discovered by a delegated resolver
///
/// Forwarded to the subtitle sink untouched; this crate never inspects
/// the contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleTrack {
    /// Subtitle file URL
    pub url: String,

    /// Language code or name as reported by the resolver
    pub language: String,

    /// Display label
    pub label: String,
}
