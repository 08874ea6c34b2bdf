//! HTTP client with rate limiting and retry logic
//!
//! All page fetches — site pages and third-party player pages alike —
//! go through this client, so one rate limit and one retry policy
//! apply to every request the scraper makes.

use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::error::{AnimekaiError, Result};
use crate::url::BASE_URL;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Site origin without a trailing slash (default: animekai.com)
    pub base_url: String,
    /// Maximum requests per second (default: 2.0)
    pub requests_per_second: f64,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Maximum retry attempts for transient errors (default: 3)
    pub max_retries: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            requests_per_second: 2.0,
            timeout_secs: 30,
            max_retries: 3,
        }
    }
}

/// Rate limiter spacing requests at least `min_interval` apart
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Mutex<Instant>,
}

impl RateLimiter {
    pub fn new(requests_per_second: f64) -> Self {
        let min_interval = Duration::from_secs_f64(1.0 / requests_per_second);
        Self {
            min_interval,
            last_request: Mutex::new(Instant::now() - min_interval),
        }
    }

    /// Acquire permission to make a request, sleeping out the remainder
    /// of the interval when called too soon after the previous request.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();

        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }

        *last = Instant::now();
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// HTTP client wrapper with rate limiting and retry logic
///
/// Timeouts, redirects and retries live here; callers above this layer
/// see either a page body or a single propagated error.
pub struct AnimekaiClient {
    client: reqwest::Client,
    base_url: String,
    rate_limiter: RateLimiter,
    max_retries: u32,
}

impl AnimekaiClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .build()
            .map_err(AnimekaiError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            rate_limiter: RateLimiter::new(config.requests_per_second),
            max_retries: config.max_retries,
        })
    }

    /// Site origin this client resolves relative paths against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch HTML content from a path on the site
    ///
    /// # Arguments
    /// * `path` - The path to fetch (e.g. "/search?q=naruto")
    ///
    /// # Errors
    /// - `Http` - Network or HTTP errors after all retries
    /// - `RateLimited` - Server returned 429 after all retries
    /// - `NotFound` - Server returned 404
    pub async fn fetch(&self, path: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        self.fetch_url(&url).await
    }

    /// Fetch HTML content from an absolute URL
    ///
    /// Used for third-party player pages, which live on a different
    /// origin than the site itself.
    pub async fn fetch_url(&self, url: &str) -> Result<String> {
        let mut last_error: Option<AnimekaiError> = None;
        let mut attempt = 0;

        while attempt <= self.max_retries {
            self.rate_limiter.acquire().await;

            match self.do_fetch(url).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    if Self::is_retryable(&e) && attempt < self.max_retries {
                        // Exponential backoff: 1s, 2s, 4s
                        let backoff = Duration::from_secs(1 << attempt);
                        tracing::warn!(url, attempt, "transient fetch error, retrying");
                        sleep(backoff).await;
                        last_error = Some(e);
                        attempt += 1;
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(last_error.unwrap_or(AnimekaiError::RateLimited))
    }

    /// Perform a single fetch attempt
    async fn do_fetch(&self, url: &str) -> Result<String> {
        tracing::debug!(url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(AnimekaiError::Http)?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AnimekaiError::RateLimited);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AnimekaiError::NotFound(url.to_string()));
        }

        if status.is_client_error() || status.is_server_error() {
            return Err(AnimekaiError::Http(
                response.error_for_status().unwrap_err(),
            ));
        }

        response.text().await.map_err(AnimekaiError::Http)
    }

    /// Check if an error is retryable
    fn is_retryable(error: &AnimekaiError) -> bool {
        match error {
            AnimekaiError::RateLimited => true,
            AnimekaiError::Http(e) => {
                e.is_timeout()
                    || e.is_connect()
                    || e.status().map(|s| s.is_server_error()).unwrap_or(false)
            }
            _ => false,
        }
    }
}
