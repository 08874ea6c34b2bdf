//! Animekai Scraper Core Library
//!
//! Site-specific scraping and link resolution for animekai.com,
//! designed to be embedded in a larger host application.
//!
//! # Overview
//!
//! This crate provides:
//! - Rate-limited HTTP client to avoid overwhelming the server
//! - HTML parsers for home page sections, search results, detail
//!   pages and episode listings
//! - A link-resolution pipeline that classifies the embedded player of
//!   an episode page and recovers playable links through a dispatch
//!   table of host resolvers
//!
//! # Example
//!
//! ```no_run
//! use animekai_core::{AnimekaiScraper, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let scraper = AnimekaiScraper::new()?;
//!
//!     // Search for anime
//!     let results = scraper.search("sword art online").await?;
//!
//!     // Load the first match and its episodes
//!     if let Some(anime) = results.first() {
//!         let detail = scraper.load(&anime.url).await?;
//!
//!         // Resolve playable links for the earliest episode
//!         if let Some(episode) = detail.episodes.first() {
//!             let found = scraper
//!                 .load_links(
//!                     &episode.url,
//!                     &mut |subtitle| println!("subtitle: {}", subtitle.url),
//!                     &mut |link| println!("{}: {}", link.name, link.url),
//!                 )
//!                 .await?;
//!             println!("resolved: {}", found);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Resolvers
//!
//! One hosting backend (streamtape) is resolved inline by reversing
//! its URL obfuscation. Other backends are handled by resolvers the
//! host application registers through
//! [`ResolverRegistry::register_delegated`]; an episode whose player
//! matches no registered resolver quietly resolves to `false`.

mod client;
mod error;
pub mod extractor;
pub mod parser;
mod scraper;
mod types;
pub mod url;

// Re-export client types
pub use client::{AnimekaiClient, ClientConfig, RateLimiter};

// Re-export error types
pub use error::{AnimekaiError, Result};

// Re-export parser functions
pub use parser::{parse_detail, parse_home_sections, parse_player_url, parse_search_results};

// Re-export the resolver capability surface
pub use extractor::{
    Delegated, DelegatedResolver, HostResolver, LinkSink, ResolverRegistry, Streamtape,
    SubtitleSink,
};

// Re-export main scraper API
pub use scraper::AnimekaiScraper;

// Re-export data types
pub use types::{
    AnimeDetail, ContentKind, Episode, HomeSection, Quality, SearchResult, SubtitleTrack,
    VideoLink,
};
