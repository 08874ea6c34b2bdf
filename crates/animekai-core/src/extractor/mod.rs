//! Host-resolver capability and dispatch registry
//!
//! A player URL is classified by testing registered resolvers in
//! order; the first whose pattern matches handles the resolution.
//! One resolver ships inline ([`Streamtape`]); resolvers for other
//! hosting backends are supplied by the host application through the
//! [`DelegatedResolver`] capability and adapted into the table with
//! [`Delegated`].

pub mod streamtape;

pub use streamtape::Streamtape;

use std::sync::Arc;

use async_trait::async_trait;

use crate::client::AnimekaiClient;
use crate::error::Result;
use crate::types::{SubtitleTrack, VideoLink};

/// Sink invoked for every resolved media link
///
/// Fire-and-forget; a single resolution call may invoke it zero, one
/// or many times.
pub type LinkSink<'a> = dyn FnMut(VideoLink) + Send + 'a;

/// Sink invoked for every subtitle track a resolver discovers
pub type SubtitleSink<'a> = dyn FnMut(SubtitleTrack) + Send + 'a;

/// A resolver for one video-hosting backend
#[async_trait]
pub trait HostResolver: Send + Sync {
    /// Name of the backend, for logging and diagnostics
    fn name(&self) -> &str;

    /// Whether this resolver handles the given player URL
    fn suitable(&self, url: &str) -> bool;

    /// Resolves the player URL, emitting results through the sinks
    ///
    /// Returns `Ok(true)` when at least the backend accepted the URL
    /// and produced its links, `Ok(false)` for a quiet miss. Errors
    /// are reserved for transport failures and violated parsing
    /// assumptions.
    async fn resolve(
        &self,
        client: &AnimekaiClient,
        url: &str,
        referer: &str,
        subtitles: &mut SubtitleSink<'_>,
        links: &mut LinkSink<'_>,
    ) -> Result<bool>;
}

/// External resolver capability supplied by the host application
///
/// The host owns a registry of generic extractors for well-known video
/// hosts; this trait is the seam through which one of them is invoked.
/// Its boolean result is trusted verbatim.
#[async_trait]
pub trait DelegatedResolver: Send + Sync {
    async fn resolve(
        &self,
        url: &str,
        referer: &str,
        subtitles: &mut SubtitleSink<'_>,
        links: &mut LinkSink<'_>,
    ) -> Result<bool>;
}

/// Adapter registering a host-supplied resolver under a URL pattern
pub struct Delegated {
    pattern: String,
    inner: Arc<dyn DelegatedResolver>,
}

impl Delegated {
    pub fn new(pattern: impl Into<String>, inner: Arc<dyn DelegatedResolver>) -> Self {
        Self {
            pattern: pattern.into(),
            inner,
        }
    }
}

#[async_trait]
impl HostResolver for Delegated {
    fn name(&self) -> &str {
        &self.pattern
    }

    fn suitable(&self, url: &str) -> bool {
        url.contains(&self.pattern)
    }

    async fn resolve(
        &self,
        _client: &AnimekaiClient,
        url: &str,
        referer: &str,
        subtitles: &mut SubtitleSink<'_>,
        links: &mut LinkSink<'_>,
    ) -> Result<bool> {
        self.inner.resolve(url, referer, subtitles, links).await
    }
}

/// Ordered dispatch table of host resolvers
///
/// Classification is first-match-wins over registration order, so
/// overlapping patterns resolve deterministically.
pub struct ResolverRegistry {
    resolvers: Vec<Box<dyn HostResolver>>,
}

impl ResolverRegistry {
    /// Registry with the built-in streamtape resolver only
    pub fn new() -> Self {
        Self {
            resolvers: vec![Box::new(Streamtape::new())],
        }
    }

    /// Registry with no resolvers at all
    pub fn empty() -> Self {
        Self {
            resolvers: Vec::new(),
        }
    }

    /// Appends a resolver to the dispatch order
    pub fn register(&mut self, resolver: Box<dyn HostResolver>) {
        self.resolvers.push(resolver);
    }

    /// Appends a host-supplied resolver under a URL pattern
    pub fn register_delegated(
        &mut self,
        pattern: impl Into<String>,
        resolver: Arc<dyn DelegatedResolver>,
    ) {
        self.register(Box::new(Delegated::new(pattern, resolver)));
    }

    /// First registered resolver whose pattern matches the URL
    pub fn find(&self, url: &str) -> Option<&dyn HostResolver> {
        self.resolvers
            .iter()
            .find(|r| r.suitable(url))
            .map(|r| r.as_ref())
    }
}

impl Default for ResolverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullResolver;

    #[async_trait]
    impl DelegatedResolver for NullResolver {
        async fn resolve(
            &self,
            _url: &str,
            _referer: &str,
            _subtitles: &mut SubtitleSink<'_>,
            _links: &mut LinkSink<'_>,
        ) -> Result<bool> {
            Ok(true)
        }
    }

    #[test]
    fn test_default_registry_matches_streamtape() {
        let registry = ResolverRegistry::new();
        let resolver = registry.find("https://streamtape.com/e/abc");
        assert!(resolver.is_some());
        assert_eq!(resolver.unwrap().name(), "streamtape");
    }

    #[test]
    fn test_registry_no_match_for_unknown_host() {
        let registry = ResolverRegistry::new();
        assert!(registry.find("https://unknownhost.io/v/abc").is_none());
    }

    #[test]
    fn test_register_delegated_pattern_match() {
        let mut registry = ResolverRegistry::new();
        registry.register_delegated("dokicloud", Arc::new(NullResolver));

        let resolver = registry.find("https://dokicloud.one/embed/xyz");
        assert!(resolver.is_some());
        assert_eq!(resolver.unwrap().name(), "dokicloud");
    }

    #[test]
    fn test_first_match_wins() {
        let mut registry = ResolverRegistry::empty();
        registry.register_delegated("stream", Arc::new(NullResolver));
        registry.register_delegated("streamtape", Arc::new(NullResolver));

        // Both patterns match; the first registered one is picked
        let resolver = registry.find("https://streamtape.com/e/abc");
        assert_eq!(resolver.unwrap().name(), "stream");
    }

    #[test]
    fn test_empty_registry_matches_nothing() {
        let registry = ResolverRegistry::empty();
        assert!(registry.find("https://streamtape.com/e/abc").is_none());
    }
}
