//! Scrape driver
//!
//! Walks pages `1..=N` of one listing, strictly in order, and writes the
//! accumulated records once at the end. Any fatal fetch error aborts the
//! run before anything is written.

use std::path::PathBuf;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::domain::{BenchmarkRecord, ListingMode, ListingUrl};
use crate::infrastructure::config::defaults;
use crate::infrastructure::csv_export::write_records;
use crate::infrastructure::http_client::HttpClient;
use crate::infrastructure::parsing::{parser_for_mode, ListingSelectors, PaginationDetector};
use crate::infrastructure::scrape_error::ScrapeResult;

/// Parameters of a single run
#[derive(Debug, Clone)]
pub struct ScrapeRequest {
    /// Listing URL; must contain `/v6/compute`, `/v6/cpu` or `/v4/cpu`
    pub base_url: String,
    /// Page count to walk; only positive values override detection
    pub max_pages_override: Option<i64>,
    pub output_path: PathBuf,
    /// Pause after every page, the last one included
    pub inter_page_delay: Duration,
    pub selectors: ListingSelectors,
}

impl ScrapeRequest {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            max_pages_override: None,
            output_path: PathBuf::from(defaults::OUTPUT_PATH),
            inter_page_delay: Duration::from_secs_f64(defaults::INTER_PAGE_DELAY_SECONDS),
            selectors: ListingSelectors::default(),
        }
    }

    /// Explicit page count when a positive override was given
    pub fn page_override(&self) -> Option<u32> {
        self.max_pages_override
            .filter(|n| *n > 0)
            .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
    }
}

#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    pub mode: ListingMode,
    pub pages_scraped: u32,
    pub records: Vec<BenchmarkRecord>,
}

/// Run one scrape and write its CSV.
///
/// The listing mode is resolved from the URL before any request is made.
pub async fn scrape(http_client: &HttpClient, request: &ScrapeRequest) -> ScrapeResult<ScrapeOutcome> {
    let listing = ListingUrl::parse(&request.base_url)?;
    let mode = listing.mode();
    let parser = parser_for_mode(mode, &request.selectors)?;
    let pagination = PaginationDetector::with_selectors(&request.selectors)?;
    debug!("Listing mode {} for {}", mode, listing.base());

    let first_url = listing.page_url(1);
    let first_page = http_client.fetch_html(&first_url).await?;

    let total_pages = match request.page_override() {
        Some(pages) => pages,
        None => pagination.detect_max_page(&first_page),
    };
    info!(
        "🚀 Scraping {} page(s) from {} (max pages: {})",
        total_pages,
        listing.base(),
        if request.page_override().is_some() { "provided" } else { "auto" }
    );

    let mut records: Vec<BenchmarkRecord> = Vec::new();
    let mut first_page = Some(first_page);

    for page in 1..=total_pages {
        let url = listing.page_url(page);
        info!("[{}/{}] GET {}", page, total_pages, url);

        let html = match first_page.take() {
            Some(html) => html,
            None => http_client.fetch_html(&url).await?,
        };

        let page_records = parser.parse_page(&html);
        if page_records.is_empty() {
            warn!("⚠️ No {} entries found on page {}", mode, page);
        } else {
            debug!("Page {} yielded {} records", page, page_records.len());
        }
        records.extend(page_records);

        sleep(request.inter_page_delay).await;
    }

    write_records(&request.output_path, mode.family(), &records)?;

    Ok(ScrapeOutcome {
        mode,
        pages_scraped: total_pages,
        records,
    })
}
