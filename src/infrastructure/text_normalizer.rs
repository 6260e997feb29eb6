//! Text normalization helpers used by every listing parser
//!
//! Listing cells carry free-form text ("Intel Core i7-8700K 3700 MHz
//! (6 cores)", "1,234"). These helpers collapse whitespace and coerce the
//! few numeric tokens we care about. All functions are pure.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

static MHZ_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*MHz").expect("valid regex"));

static CORES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\((\d+)\s+cores?\)").expect("valid regex"));

/// Replace every run of whitespace with one space and trim both ends
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

/// First `<number> MHz` token, case-insensitive
pub fn extract_frequency_mhz(text: &str) -> Option<f64> {
    MHZ_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// First parenthesised `(<n> core)` / `(<n> cores)` token
pub fn extract_core_count(text: &str) -> Option<u32> {
    CORES_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
}

/// Parse a score such as `"12,345"`.
///
/// Thousands separators are stripped; anything else that is not an ASCII
/// digit makes the whole value `None` rather than a partially parsed number.
pub fn parse_strict_integer(text: &str) -> Option<u64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() || !cleaned.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    cleaned.parse::<u64>().ok()
}
