//! Error types for the scraping pipeline
//!
//! Every variant here is fatal for a run. Parse-level anomalies (garbled
//! numbers, missing sub-elements, short table rows) never become errors:
//! the field turns into a null or the container is skipped.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Unsupported base URL (expect /v6/compute, /v6/cpu, or /v4/cpu): {url}")]
    UnsupportedListing { url: String },

    #[error("Invalid base URL: {url} - {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("HTTP request failed: {status} - {url} (after {attempts} attempts)")]
    HttpStatus {
        status: u16,
        url: String,
        attempts: u32,
    },

    #[error("HTTP request failed: {url}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to create HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Invalid header value for {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("Invalid CSS selector: {selector} - {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Failed to write CSV output")]
    Export(#[from] csv::Error),

    #[error("I/O error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl ScrapeError {
    /// Create an unsupported listing error for a base URL
    pub fn unsupported_listing(url: &str) -> Self {
        Self::UnsupportedListing {
            url: url.to_string(),
        }
    }

    /// Create an invalid selector error
    pub fn invalid_selector(selector: &str, reason: impl std::fmt::Display) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Final HTTP status carried by the error, if the server answered at all
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Request { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for ScrapeError {
    fn from(err: config::ConfigError) -> Self {
        Self::config(err.to_string())
    }
}

pub type ScrapeResult<T> = Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_message_carries_status() {
        let err = ScrapeError::HttpStatus {
            status: 503,
            url: "https://browser.geekbench.com/v6/cpu?page=1".to_string(),
            attempts: 3,
        };
        let message = err.to_string();
        assert!(message.contains("503"));
        assert!(message.contains("after 3 attempts"));
        assert_eq!(err.http_status(), Some(503));
    }

    #[test]
    fn test_unsupported_listing_names_url() {
        let err = ScrapeError::unsupported_listing("https://example.com/v5/cpu");
        assert!(err.to_string().contains("https://example.com/v5/cpu"));
        assert_eq!(err.http_status(), None);
    }
}
