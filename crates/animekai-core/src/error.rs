//! Error types for the animekai scraper
//!
//! Provides a single error enum with human-readable messages and
//! host-app-compatible serialization.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all animekai scraper operations
///
/// Implements Display for human-readable messages and Serialize
/// so host applications can forward errors as plain strings.
#[derive(Error, Debug)]
pub enum AnimekaiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to parse HTML content
    #[error("Failed to parse HTML: {0}")]
    Parse(String),

    /// Expected HTML element or script marker was not found
    ///
    /// Raised by the inline resolver when the player page no longer
    /// carries the obfuscated payload it is built around. Expected
    /// misses (no player iframe, unsupported host) are reported as
    /// `false`/`None` instead, never through this variant.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Rate limited by server (HTTP 429)
    #[error("Rate limited - too many requests")]
    RateLimited,

    /// Page not found on server
    #[error("Page not found: {0}")]
    NotFound(String),

    /// Invalid search query provided
    #[error("Invalid search query: {0}")]
    InvalidQuery(String),
}

impl Serialize for AnimekaiError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for animekai scraper operations
pub type Result<T> = std::result::Result<T, AnimekaiError>;
