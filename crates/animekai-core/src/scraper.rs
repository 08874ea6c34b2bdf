//! Main scraper API for animekai.com
//!
//! Combines the HTTP client, the structural parsers and the resolver
//! registry into the entry points a host application calls.

use crate::client::{AnimekaiClient, ClientConfig};
use crate::error::{AnimekaiError, Result};
use crate::extractor::{LinkSink, ResolverRegistry, SubtitleSink};
use crate::parser::{parse_detail, parse_home_sections, parse_player_url, parse_search_results};
use crate::types::{AnimeDetail, HomeSection, SearchResult};
use crate::url::build_search_path;

/// Main scraper API for animekai.com
///
/// Every entry point is independently invocable; all state is local to
/// the call, so a host may run many of them concurrently.
pub struct AnimekaiScraper {
    client: AnimekaiClient,
    resolvers: ResolverRegistry,
}

impl AnimekaiScraper {
    /// Create a new scraper with default configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new scraper with custom client configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_registry(config, ResolverRegistry::new())
    }

    /// Create a new scraper with a custom resolver registry
    ///
    /// Use this to register the host's delegated resolvers for hosting
    /// backends the crate does not resolve inline.
    pub fn with_registry(config: ClientConfig, resolvers: ResolverRegistry) -> Result<Self> {
        let client = AnimekaiClient::with_config(config)?;
        Ok(Self { client, resolvers })
    }

    /// The resolver dispatch table, for registering delegated resolvers
    pub fn registry_mut(&mut self) -> &mut ResolverRegistry {
        &mut self.resolvers
    }

    /// Load the home page sections
    ///
    /// # Returns
    /// The non-empty named sections of the main page, in page order
    pub async fn main_page(&self) -> Result<Vec<HomeSection>> {
        let html = self.client.fetch("/").await?;
        parse_home_sections(&html, self.client.base_url())
    }

    /// Search for anime by query
    ///
    /// # Returns
    /// Matching result cards, empty when nothing matches
    ///
    /// # Errors
    /// - `InvalidQuery` if the query is empty or whitespace only
    /// - `Http`/`RateLimited`/`NotFound` from the fetch
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(AnimekaiError::InvalidQuery(
                "Search query cannot be empty".to_string(),
            ));
        }

        let html = self.client.fetch(&build_search_path(trimmed)).await?;
        parse_search_results(&html, self.client.base_url())
    }

    /// Load the detail record for an anime page URL
    pub async fn load(&self, url: &str) -> Result<AnimeDetail> {
        let html = self.client.fetch_url(url).await?;
        parse_detail(&html, self.client.base_url())
    }

    /// Resolve the playable links of one episode page
    ///
    /// Fetches the episode page, extracts the embedded player
    /// reference, classifies its host and hands resolution to the
    /// matching entry of the dispatch table. Results are emitted
    /// through the sinks as they are found.
    ///
    /// # Returns
    /// `Ok(false)` when the page has no supported player — either no
    /// player element at all or a host no registered resolver matches.
    /// Both are expected outcomes, reported without touching the
    /// sinks. `Ok(true)` when a resolver accepted the URL.
    ///
    /// # Errors
    /// Transport failures propagate unchanged; the inline resolver
    /// fails when the player page no longer matches its parsing
    /// assumptions.
    pub async fn load_links(
        &self,
        episode_url: &str,
        subtitles: &mut SubtitleSink<'_>,
        links: &mut LinkSink<'_>,
    ) -> Result<bool> {
        let html = self.client.fetch_url(episode_url).await?;

        let Some(player_url) = parse_player_url(&html, self.client.base_url()) else {
            tracing::debug!(episode_url, "no embedded player reference");
            return Ok(false);
        };

        let Some(resolver) = self.resolvers.find(&player_url) else {
            tracing::debug!(player_url, "no resolver for host");
            return Ok(false);
        };

        tracing::debug!(player_url, resolver = resolver.name(), "resolving links");
        resolver
            .resolve(
                &self.client,
                &player_url,
                self.client.base_url(),
                subtitles,
                links,
            )
            .await
    }
}
