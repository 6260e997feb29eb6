//! Legacy CPU results table (`/v4/cpu` listings)
//!
//! Row shape: `uploaded | system + model line | platform | user | single | multi`.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::selectors::{compile, ListingSelectors};
use super::{element_text, optional_text, ListingParser};
use crate::domain::{BenchmarkRecord, CpuDetails, CpuRecord, SchemaTag};
use crate::infrastructure::scrape_error::ScrapeResult;
use crate::infrastructure::text_normalizer::parse_strict_integer;

const CELLS_PER_ROW: usize = 6;

pub struct LegacyCpuParser {
    table: Selector,
    row: Selector,
    cell: Selector,
    timestamp: Selector,
    link: Selector,
    span: Selector,
}

impl LegacyCpuParser {
    pub fn new() -> ScrapeResult<Self> {
        Self::with_selectors(&ListingSelectors::default())
    }

    pub fn with_selectors(selectors: &ListingSelectors) -> ScrapeResult<Self> {
        Ok(Self {
            table: compile(&selectors.legacy_table)?,
            row: compile(&selectors.legacy_row)?,
            cell: compile(&selectors.legacy_cell)?,
            timestamp: compile(&selectors.legacy_timestamp)?,
            link: compile("a")?,
            span: compile("span")?,
        })
    }

    fn parse_row(&self, row: ElementRef<'_>) -> Option<CpuRecord> {
        let cells: Vec<ElementRef<'_>> = row.select(&self.cell).collect();
        if cells.len() != CELLS_PER_ROW {
            return None;
        }
        cells[0].select(&self.timestamp).next()?;

        let system_link = cells[1].select(&self.link).next();
        let system = system_link.map_or_else(|| element_text(cells[1]), element_text);
        let result_url = system_link
            .and_then(|a| a.value().attr("href"))
            .unwrap_or_default()
            .to_string();

        let details = cells[1]
            .select(&self.span)
            .next()
            .map(|span| CpuDetails::from_text(element_text(span)))
            .unwrap_or_default();

        let record = CpuRecord {
            uploaded: element_text(cells[0]),
            system,
            details,
            platform: element_text(cells[2]),
            user: optional_text(cells[3].select(&self.link).next()),
            single_core_score: parse_strict_integer(&element_text(cells[4])),
            multi_core_score: parse_strict_integer(&element_text(cells[5])),
            result_url,
            schema: SchemaTag::V4,
        };

        if record.system.is_empty() && record.result_url.is_empty() {
            return None;
        }
        Some(record)
    }
}

impl ListingParser for LegacyCpuParser {
    fn schema(&self) -> SchemaTag {
        SchemaTag::V4
    }

    fn parse_page(&self, html: &Html) -> Vec<BenchmarkRecord> {
        let Some(table) = html.select(&self.table).next() else {
            debug!("No legacy results table on page");
            return Vec::new();
        };

        let records: Vec<BenchmarkRecord> = table
            .select(&self.row)
            .filter_map(|row| self.parse_row(row))
            .map(BenchmarkRecord::from)
            .collect();

        debug!("Extracted {} legacy CPU rows", records.len());
        records
    }
}
