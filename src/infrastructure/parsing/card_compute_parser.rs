//! GPU compute result cards (`/v6/compute` listings)
//!
//! Same card traversal as the CPU cards, but the score column is named
//! after the compute API ("Metal Score", "Vulkan Score", "OpenCL Score"),
//! so the observed label is recorded next to its value.

use scraper::{ElementRef, Html};
use tracing::debug;

use super::card::CardSelectors;
use super::selectors::ListingSelectors;
use super::ListingParser;
use crate::domain::{BenchmarkRecord, GpuRecord, SchemaTag};
use crate::infrastructure::scrape_error::ScrapeResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeCardLabel {
    Uploaded,
    Platform,
    Api,
    /// Any label ending in the literal word "Score"
    Score,
}

impl ComputeCardLabel {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Uploaded" => Some(Self::Uploaded),
            "Platform" => Some(Self::Platform),
            "API" => Some(Self::Api),
            l if l.ends_with("Score") => Some(Self::Score),
            _ => None,
        }
    }
}

pub struct CardComputeParser {
    card: CardSelectors,
}

impl CardComputeParser {
    pub fn new() -> ScrapeResult<Self> {
        Self::with_selectors(&ListingSelectors::default())
    }

    pub fn with_selectors(selectors: &ListingSelectors) -> ScrapeResult<Self> {
        Ok(Self {
            card: CardSelectors::compile(selectors, &selectors.compute_result_link)?,
        })
    }

    fn parse_card(&self, card: ElementRef<'_>) -> Option<GpuRecord> {
        let system = self.card.system_column(card);
        let mut record = GpuRecord {
            uploaded: String::new(),
            system: system.system,
            details: system.details,
            platform: String::new(),
            api: String::new(),
            score_label: String::new(),
            compute_score: None,
            result_url: system.result_url,
            schema: SchemaTag::V6Compute,
        };

        for (label, column) in self.card.stat_columns(card) {
            match ComputeCardLabel::from_label(&label) {
                Some(ComputeCardLabel::Uploaded) => record.uploaded = self.card.text_value(column),
                Some(ComputeCardLabel::Platform) => record.platform = self.card.text_value(column),
                Some(ComputeCardLabel::Api) => record.api = self.card.text_value(column),
                Some(ComputeCardLabel::Score) => {
                    record.compute_score = self.card.score_value(column);
                    record.score_label = label;
                }
                None => debug!("Ignoring unknown compute card label '{}'", label),
            }
        }

        if record.system.is_empty() && record.result_url.is_empty() {
            return None;
        }
        Some(record)
    }
}

impl ListingParser for CardComputeParser {
    fn schema(&self) -> SchemaTag {
        SchemaTag::V6Compute
    }

    fn parse_page(&self, html: &Html) -> Vec<BenchmarkRecord> {
        let cards = self.card.cards(html);
        let records: Vec<BenchmarkRecord> = cards
            .iter()
            .filter_map(|card| self.parse_card(*card))
            .map(BenchmarkRecord::from)
            .collect();

        debug!(
            "Extracted {} compute card records from {} cards",
            records.len(),
            cards.len()
        );
        records
    }
}
