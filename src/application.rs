//! Application layer
//!
//! Orchestrates fetching, parsing and export for one scrape run.

pub mod scrape_driver;

pub use scrape_driver::{scrape, ScrapeOutcome, ScrapeRequest};
