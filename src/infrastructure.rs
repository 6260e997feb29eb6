//! Infrastructure layer: network access, HTML parsing, export, configuration
//! and logging

pub mod config;
pub mod csv_export;
pub mod http_client;
pub mod logging;
pub mod parsing;
pub mod scrape_error;
pub mod text_normalizer;

pub use config::{AppConfig, ScrapeDefaults};
pub use csv_export::write_records;
pub use http_client::{HttpClient, HttpClientConfig};
pub use logging::{init_logging_with_config, LoggingConfig};
pub use parsing::{parser_for_mode, ListingParser, ListingSelectors, PaginationDetector};
pub use scrape_error::{ScrapeError, ScrapeResult};
