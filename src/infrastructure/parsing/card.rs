//! Traversal shared by the two card layouts (CPU and GPU compute)
//!
//! A card looks like:
//!
//! ```text
//! .list-col > .list-col-inner
//!   .col-12.col-lg-4          system link + model line
//!   .col-6.col-md-3.col-lg-2  label / value   (repeated)
//! ```

use scraper::{ElementRef, Html, Selector};

use super::selectors::{compile, ListingSelectors};
use super::{element_text, optional_text};
use crate::domain::CpuDetails;
use crate::infrastructure::scrape_error::ScrapeResult;
use crate::infrastructure::text_normalizer::parse_strict_integer;

/// Left column of a card
#[derive(Debug, Default)]
pub struct SystemColumn {
    pub system: String,
    pub result_url: String,
    pub details: CpuDetails,
}

pub struct CardSelectors {
    container: Selector,
    system_column: Selector,
    result_link: Selector,
    model: Selector,
    stat_column: Selector,
    label: Selector,
    text_value: Selector,
    score_value: Selector,
    user_link: Selector,
}

impl CardSelectors {
    /// `result_link` picks the flavour: CPU and compute cards differ only in
    /// where their system link points
    pub fn compile(selectors: &ListingSelectors, result_link: &str) -> ScrapeResult<Self> {
        Ok(Self {
            container: compile(&selectors.card_container)?,
            system_column: compile(&selectors.card_system_column)?,
            result_link: compile(result_link)?,
            model: compile(&selectors.card_model)?,
            stat_column: compile(&selectors.card_stat_column)?,
            label: compile(&selectors.card_label)?,
            text_value: compile(&selectors.card_text_value)?,
            score_value: compile(&selectors.card_score_value)?,
            user_link: compile(&selectors.card_user_link)?,
        })
    }

    pub fn cards<'a>(&self, html: &'a Html) -> Vec<ElementRef<'a>> {
        html.select(&self.container).collect()
    }

    pub fn system_column(&self, card: ElementRef<'_>) -> SystemColumn {
        let Some(column) = card.select(&self.system_column).next() else {
            return SystemColumn::default();
        };

        let (system, result_url) = column
            .select(&self.result_link)
            .next()
            .map(|link| {
                (
                    element_text(link),
                    link.value().attr("href").unwrap_or_default().to_string(),
                )
            })
            .unwrap_or_default();

        let details = column
            .select(&self.model)
            .next()
            .map(|model| CpuDetails::from_text(element_text(model)))
            .unwrap_or_default();

        SystemColumn {
            system,
            result_url,
            details,
        }
    }

    /// `(label, column)` pairs; columns without a label element are dropped
    pub fn stat_columns<'a>(&self, card: ElementRef<'a>) -> Vec<(String, ElementRef<'a>)> {
        card.select(&self.stat_column)
            .filter_map(|column| {
                let label = column.select(&self.label).next()?;
                Some((element_text(label), column))
            })
            .collect()
    }

    pub fn text_value(&self, column: ElementRef<'_>) -> String {
        optional_text(column.select(&self.text_value).next())
    }

    pub fn score_value(&self, column: ElementRef<'_>) -> Option<u64> {
        parse_strict_integer(&optional_text(column.select(&self.score_value).next()))
    }

    pub fn uploader(&self, column: ElementRef<'_>) -> Option<String> {
        column.select(&self.user_link).next().map(element_text)
    }
}
