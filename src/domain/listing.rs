//! Listing modes and page URL construction

use std::fmt;
use url::Url;

use super::record::{RecordFamily, SchemaTag};
use crate::infrastructure::scrape_error::{ScrapeError, ScrapeResult};

/// Listing kind selected from the shape of the base URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingMode {
    V6Compute,
    V6Cpu,
    V4Cpu,
}

impl ListingMode {
    /// Path fragments checked in order; compute must win over cpu
    const PATH_FRAGMENTS: [(&'static str, Self); 3] = [
        ("/v6/compute", Self::V6Compute),
        ("/v6/cpu", Self::V6Cpu),
        ("/v4/cpu", Self::V4Cpu),
    ];

    pub fn from_base_url(base_url: &str) -> ScrapeResult<Self> {
        Self::PATH_FRAGMENTS
            .iter()
            .find(|(fragment, _)| base_url.contains(fragment))
            .map(|(_, mode)| *mode)
            .ok_or_else(|| ScrapeError::unsupported_listing(base_url))
    }

    pub const fn schema(self) -> SchemaTag {
        match self {
            Self::V6Compute => SchemaTag::V6Compute,
            Self::V6Cpu => SchemaTag::V6,
            Self::V4Cpu => SchemaTag::V4,
        }
    }

    pub const fn family(self) -> RecordFamily {
        self.schema().family()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V6Compute => "v6-compute",
            Self::V6Cpu => "v6-cpu",
            Self::V4Cpu => "v4-cpu",
        }
    }
}

impl fmt::Display for ListingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated listing base URL together with its mode
#[derive(Debug, Clone)]
pub struct ListingUrl {
    base: Url,
    mode: ListingMode,
}

impl ListingUrl {
    /// Trailing slashes are dropped before the mode is decided, so
    /// `https://browser.geekbench.com/v6/cpu/` and `.../v6/cpu` are the same
    /// listing.
    pub fn parse(raw: &str) -> ScrapeResult<Self> {
        let trimmed = raw.trim().trim_end_matches('/');
        let mode = ListingMode::from_base_url(trimmed)?;
        let base = Url::parse(trimmed).map_err(|e| ScrapeError::InvalidBaseUrl {
            url: trimmed.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { base, mode })
    }

    pub const fn mode(&self) -> ListingMode {
        self.mode
    }

    pub fn base(&self) -> &str {
        self.base.as_str()
    }

    /// Base URL with `page=<n>` appended to its query
    pub fn page_url(&self, page: u32) -> String {
        let mut url = self.base.clone();
        url.query_pairs_mut().append_pair("page", &page.to_string());
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://browser.geekbench.com/v6/compute", ListingMode::V6Compute)]
    #[case("https://browser.geekbench.com/v6/compute/vulkan", ListingMode::V6Compute)]
    #[case("https://browser.geekbench.com/v6/cpu/singlecore", ListingMode::V6Cpu)]
    #[case("https://browser.geekbench.com/v4/cpu/", ListingMode::V4Cpu)]
    fn test_mode_detection(#[case] url: &str, #[case] expected: ListingMode) {
        let listing = ListingUrl::parse(url).unwrap();
        assert_eq!(listing.mode(), expected);
    }

    #[rstest]
    #[case("https://browser.geekbench.com/v5/cpu")]
    #[case("https://browser.geekbench.com/")]
    #[case("")]
    fn test_unsupported_listing(#[case] url: &str) {
        let err = ListingUrl::parse(url).unwrap_err();
        assert!(matches!(err, ScrapeError::UnsupportedListing { .. }));
    }

    #[test]
    fn test_relative_base_is_invalid() {
        let err = ListingUrl::parse("/v6/cpu").unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_page_url_appends_query() {
        let listing = ListingUrl::parse("https://browser.geekbench.com/v6/cpu/").unwrap();
        assert_eq!(
            listing.page_url(3),
            "https://browser.geekbench.com/v6/cpu?page=3"
        );
    }

    #[test]
    fn test_page_url_keeps_existing_query() {
        let listing =
            ListingUrl::parse("https://browser.geekbench.com/v6/compute?api=vulkan").unwrap();
        assert_eq!(
            listing.page_url(1),
            "https://browser.geekbench.com/v6/compute?api=vulkan&page=1"
        );
    }

    #[test]
    fn test_mode_schema_and_family() {
        assert_eq!(ListingMode::V4Cpu.schema(), SchemaTag::V4);
        assert_eq!(ListingMode::V6Cpu.family(), RecordFamily::Cpu);
        assert_eq!(ListingMode::V6Compute.family(), RecordFamily::Gpu);
    }
}
