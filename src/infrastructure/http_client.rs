//! HTTP client for fetching listing pages
//!
//! The only network boundary of the crate. Requests carry a browser-like
//! header set (the site rejects obvious non-browser clients), are retried a
//! bounded number of times with linear backoff, and come back as parsed
//! `scraper::Html` documents.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, ClientBuilder, StatusCode};
use scraper::Html;
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::infrastructure::config::defaults;
use crate::infrastructure::scrape_error::{ScrapeError, ScrapeResult};

/// Configuration for HTTP client behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpClientConfig {
    /// User agent string
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Total attempts per URL, first try included
    pub max_attempts: u32,
    /// Backoff unit; attempt `n` waits `n * retry_backoff_ms` before retrying
    pub retry_backoff_ms: u64,
    /// Whether to follow redirects
    pub follow_redirects: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::USER_AGENT.to_string(),
            timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            max_attempts: defaults::MAX_ATTEMPTS,
            retry_backoff_ms: defaults::RETRY_BACKOFF_MS,
            follow_redirects: true,
        }
    }
}

impl HttpClientConfig {
    /// Delay slept after failed attempt number `attempt` (1-based)
    pub fn backoff_for_attempt(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(u64::from(attempt)))
    }
}

/// Outcome of a single GET
enum Attempt {
    Body(String),
    Status(StatusCode),
    Transport(reqwest::Error),
}

#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> ScrapeResult<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(Self::default_headers(&config)?)
            .cookie_store(true)
            .gzip(true)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(10)
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .map_err(ScrapeError::ClientBuild)?;

        Ok(Self { client, config })
    }

    fn default_headers(config: &HttpClientConfig) -> ScrapeResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (name, value) in [
            (USER_AGENT, config.user_agent.as_str()),
            (ACCEPT, defaults::ACCEPT),
            (ACCEPT_LANGUAGE, defaults::ACCEPT_LANGUAGE),
        ] {
            let value = Self::header_value(&name, value)?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    fn header_value(name: &HeaderName, value: &str) -> ScrapeResult<HeaderValue> {
        HeaderValue::from_str(value).map_err(|e| ScrapeError::InvalidHeader {
            name: name.to_string(),
            reason: e.to_string(),
        })
    }

    pub const fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Fetch a page and parse it into a document.
    ///
    /// Any status other than 200 and transport failures are retried until
    /// `max_attempts` is used up; the error then carries the last status.
    pub async fn fetch_html(&self, url: &str) -> ScrapeResult<Html> {
        let body = self.fetch_text(url).await?;
        Ok(Html::parse_document(&body))
    }

    /// Fetch a page body with the retry policy applied
    pub async fn fetch_text(&self, url: &str) -> ScrapeResult<String> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            info!("🌐 HTTP GET (attempt {}/{}): {}", attempt, max_attempts, url);

            let outcome = self.fetch_once(url).await;
            let failure = match outcome {
                Attempt::Body(body) => {
                    debug!("Fetched {} ({} bytes) on attempt {}", url, body.len(), attempt);
                    return Ok(body);
                }
                Attempt::Status(status) => {
                    warn!("HTTP {} on attempt {}/{}: {}", status, attempt, max_attempts, url);
                    ScrapeError::HttpStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                        attempts: attempt,
                    }
                }
                Attempt::Transport(e) => {
                    warn!("Network error on attempt {}/{}: {}", attempt, max_attempts, e);
                    ScrapeError::Request {
                        url: url.to_string(),
                        source: e,
                    }
                }
            };

            if attempt >= max_attempts {
                error!("❌ Giving up on {} after {} attempts: {}", url, attempt, failure);
                return Err(failure);
            }

            sleep(self.config.backoff_for_attempt(attempt)).await;
            attempt += 1;
        }
    }

    async fn fetch_once(&self, url: &str) -> Attempt {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return Attempt::Transport(e),
        };

        let status = response.status();
        if status != StatusCode::OK {
            return Attempt::Status(status);
        }

        match response.text().await {
            Ok(body) => Attempt::Body(body),
            Err(e) => Attempt::Transport(e),
        }
    }
}
