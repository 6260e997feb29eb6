//! CSS selectors for the three listing layouts
//!
//! Kept as plain strings so a layout tweak on the site can be patched from
//! the config file (`[selectors]` table) without a rebuild.

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::infrastructure::scrape_error::{ScrapeError, ScrapeResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingSelectors {
    /// Pagination control on any listing page
    pub pagination: String,

    /// Legacy results table and its row parts
    pub legacy_table: String,
    pub legacy_row: String,
    pub legacy_cell: String,
    pub legacy_timestamp: String,

    /// Card containers (current layout)
    pub card_container: String,
    pub card_system_column: String,
    pub card_model: String,
    pub card_stat_column: String,
    pub card_label: String,
    pub card_text_value: String,
    pub card_score_value: String,
    pub card_user_link: String,

    /// Result links inside the system column, per card flavour
    pub cpu_result_link: String,
    pub compute_result_link: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            pagination: "ul.pagination".to_string(),
            legacy_table: "table.geekbench3-index".to_string(),
            legacy_row: "tr".to_string(),
            legacy_cell: "td".to_string(),
            legacy_timestamp: "span.timestamp-to-local-min".to_string(),
            card_container: ".list-col .list-col-inner".to_string(),
            card_system_column: ".col-12.col-lg-4".to_string(),
            card_model: ".list-col-model".to_string(),
            card_stat_column: ".col-6.col-md-3.col-lg-2".to_string(),
            card_label: ".list-col-subtitle, .list-col-subtitle-score".to_string(),
            card_text_value: ".list-col-text".to_string(),
            card_score_value: ".list-col-text-score".to_string(),
            card_user_link: "a[href^='/user/']".to_string(),
            cpu_result_link: "a[href^='/v6/cpu/']".to_string(),
            compute_result_link: "a[href^='/v6/compute/']".to_string(),
        }
    }
}

impl ListingSelectors {
    /// Compile every selector once, reporting the first one that is invalid
    pub fn validate(&self) -> ScrapeResult<()> {
        [
            &self.pagination,
            &self.legacy_table,
            &self.legacy_row,
            &self.legacy_cell,
            &self.legacy_timestamp,
            &self.card_container,
            &self.card_system_column,
            &self.card_model,
            &self.card_stat_column,
            &self.card_label,
            &self.card_text_value,
            &self.card_score_value,
            &self.card_user_link,
            &self.cpu_result_link,
            &self.compute_result_link,
        ]
        .into_iter()
        .try_for_each(|s| compile(s).map(drop))
    }
}

/// Compile a selector string, mapping scraper's error into ours
pub fn compile(selector: &str) -> ScrapeResult<Selector> {
    Selector::parse(selector).map_err(|e| ScrapeError::invalid_selector(selector, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selectors_compile() {
        assert!(ListingSelectors::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_selector_is_reported() {
        let selectors = ListingSelectors {
            card_model: "div[".to_string(),
            ..Default::default()
        };
        let err = selectors.validate().unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidSelector { ref selector, .. } if selector == "div["));
    }
}
