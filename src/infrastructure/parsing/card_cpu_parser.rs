//! CPU result cards (`/v6/cpu` listings)

use scraper::{ElementRef, Html};
use tracing::debug;

use super::card::CardSelectors;
use super::selectors::ListingSelectors;
use super::ListingParser;
use crate::domain::{BenchmarkRecord, CpuRecord, SchemaTag};
use crate::infrastructure::scrape_error::ScrapeResult;

/// Stat column labels a CPU card is known to carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuCardLabel {
    Uploaded,
    Platform,
    SingleCoreScore,
    MultiCoreScore,
}

impl CpuCardLabel {
    /// Exact label match; anything else is ignored by the parser
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Uploaded" => Some(Self::Uploaded),
            "Platform" => Some(Self::Platform),
            "Single-Core Score" => Some(Self::SingleCoreScore),
            "Multi-Core Score" => Some(Self::MultiCoreScore),
            _ => None,
        }
    }
}

pub struct CardCpuParser {
    card: CardSelectors,
}

impl CardCpuParser {
    pub fn new() -> ScrapeResult<Self> {
        Self::with_selectors(&ListingSelectors::default())
    }

    pub fn with_selectors(selectors: &ListingSelectors) -> ScrapeResult<Self> {
        Ok(Self {
            card: CardSelectors::compile(selectors, &selectors.cpu_result_link)?,
        })
    }

    fn parse_card(&self, card: ElementRef<'_>) -> Option<CpuRecord> {
        let system = self.card.system_column(card);
        let mut record = CpuRecord {
            uploaded: String::new(),
            system: system.system,
            details: system.details,
            platform: String::new(),
            user: String::new(),
            single_core_score: None,
            multi_core_score: None,
            result_url: system.result_url,
            schema: SchemaTag::V6,
        };

        for (label, column) in self.card.stat_columns(card) {
            match CpuCardLabel::from_label(&label) {
                Some(CpuCardLabel::Uploaded) => {
                    record.uploaded = self.card.text_value(column);
                    if let Some(user) = self.card.uploader(column) {
                        record.user = user;
                    }
                }
                Some(CpuCardLabel::Platform) => record.platform = self.card.text_value(column),
                Some(CpuCardLabel::SingleCoreScore) => {
                    record.single_core_score = self.card.score_value(column);
                }
                Some(CpuCardLabel::MultiCoreScore) => {
                    record.multi_core_score = self.card.score_value(column);
                }
                None => debug!("Ignoring unknown CPU card label '{}'", label),
            }
        }

        if record.system.is_empty() && record.result_url.is_empty() {
            return None;
        }
        Some(record)
    }
}

impl ListingParser for CardCpuParser {
    fn schema(&self) -> SchemaTag {
        SchemaTag::V6
    }

    fn parse_page(&self, html: &Html) -> Vec<BenchmarkRecord> {
        let cards = self.card.cards(html);
        let records: Vec<BenchmarkRecord> = cards
            .iter()
            .filter_map(|card| self.parse_card(*card))
            .map(BenchmarkRecord::from)
            .collect();

        debug!(
            "Extracted {} CPU card records from {} cards",
            records.len(),
            cards.len()
        );
        records
    }
}
