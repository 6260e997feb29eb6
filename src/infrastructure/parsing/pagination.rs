//! Highest page number advertised by a listing's pagination control

use scraper::{Html, Selector};
use tracing::debug;

use super::element_text;
use super::selectors::{compile, ListingSelectors};
use crate::infrastructure::scrape_error::ScrapeResult;

pub struct PaginationDetector {
    control: Selector,
    link: Selector,
}

impl PaginationDetector {
    pub fn new() -> ScrapeResult<Self> {
        Self::with_selectors(&ListingSelectors::default())
    }

    pub fn with_selectors(selectors: &ListingSelectors) -> ScrapeResult<Self> {
        Ok(Self {
            control: compile(&selectors.pagination)?,
            link: compile("a")?,
        })
    }

    /// Maximum numeric link label inside the pagination control.
    ///
    /// No control means a single-page listing; a control without numeric
    /// labels ("Next", "…") also counts as one page.
    pub fn detect_max_page(&self, html: &Html) -> u32 {
        let Some(control) = html.select(&self.control).next() else {
            debug!("No pagination control found, assuming a single page");
            return 1;
        };

        let max_page = control
            .select(&self.link)
            .map(element_text)
            .filter(|label| !label.is_empty() && label.bytes().all(|b| b.is_ascii_digit()))
            .filter_map(|label| label.parse::<u32>().ok())
            .max()
            .unwrap_or(1);

        debug!("Highest pagination link: {}", max_page);
        max_page
    }
}
