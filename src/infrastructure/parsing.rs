//! HTML parsing for Geekbench browser listings
//!
//! One parser per page schema. The layouts are structurally incompatible
//! (table rows vs. div cards, fixed vs. API-named score columns), so each
//! schema is an isolated parser behind the same [`ListingParser`] trait.

pub mod card;
pub mod card_compute_parser;
pub mod card_cpu_parser;
pub mod legacy_cpu_parser;
pub mod pagination;
pub mod selectors;

pub use card_compute_parser::CardComputeParser;
pub use card_cpu_parser::CardCpuParser;
pub use legacy_cpu_parser::LegacyCpuParser;
pub use pagination::PaginationDetector;
pub use selectors::ListingSelectors;

use scraper::{ElementRef, Html};

use crate::domain::{BenchmarkRecord, ListingMode, SchemaTag};
use crate::infrastructure::scrape_error::ScrapeResult;
use crate::infrastructure::text_normalizer::normalize_whitespace;

/// A stateless parser for one listing page schema
pub trait ListingParser {
    /// Schema tag stamped on every record this parser emits
    fn schema(&self) -> SchemaTag;

    /// Extract every valid record on the page.
    ///
    /// Containers failing required-field checks are skipped, never reported
    /// as errors.
    fn parse_page(&self, html: &Html) -> Vec<BenchmarkRecord>;
}

/// Build the parser matching a listing mode
pub fn parser_for_mode(
    mode: ListingMode,
    selectors: &ListingSelectors,
) -> ScrapeResult<Box<dyn ListingParser>> {
    Ok(match mode {
        ListingMode::V6Compute => Box::new(CardComputeParser::with_selectors(selectors)?),
        ListingMode::V6Cpu => Box::new(CardCpuParser::with_selectors(selectors)?),
        ListingMode::V4Cpu => Box::new(LegacyCpuParser::with_selectors(selectors)?),
    })
}

/// Visible text of an element: text nodes trimmed, empty ones dropped,
/// joined by single spaces, then whitespace-normalised
pub fn element_text(element: ElementRef<'_>) -> String {
    let joined = element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    normalize_whitespace(&joined)
}

/// `element_text` of an optional element, empty when absent
pub fn optional_text(element: Option<ElementRef<'_>>) -> String {
    element.map(element_text).unwrap_or_default()
}
