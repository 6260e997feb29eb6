//! Geekbench Browser listing scraper
//!
//! Fetches paginated result listings (`/v6/cpu`, `/v6/compute`, `/v4/cpu`),
//! extracts one record per result and writes them to CSV.

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

pub use application::{scrape, ScrapeOutcome, ScrapeRequest};
pub use domain::{BenchmarkRecord, ListingMode, RecordFamily, SchemaTag};
pub use infrastructure::{AppConfig, HttpClient, HttpClientConfig, ScrapeError, ScrapeResult};
