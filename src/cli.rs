//! Command-line entry point
//!
//! Flags sit on top of the layered [`AppConfig`]; anything left unset falls
//! back to the config file, the environment, or the built-in defaults.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use crate::application::{scrape, ScrapeRequest};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::http_client::HttpClient;
use crate::infrastructure::logging::{console_logging_active, init_logging_with_config};
use crate::infrastructure::scrape_error::ScrapeResult;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "geekbench-scrape",
    about = "Scrape Geekbench Browser result listings into a CSV file",
    version
)]
pub struct Args {
    /// Listing URL, e.g. https://browser.geekbench.com/v6/cpu
    /// (also /v6/compute or /v4/cpu)
    #[arg(long)]
    pub base: String,

    /// Number of pages to scrape; auto-detected unless positive
    #[arg(long, allow_negative_numbers = true)]
    pub max_pages: Option<i64>,

    /// Output CSV path [default: geekbench_results.csv]
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Seconds to wait after each page [default: 0.5]
    #[arg(long, value_parser = parse_delay_seconds)]
    pub sleep: Option<f64>,

    /// Extra configuration file (TOML, JSON or YAML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level or filter directives, e.g. "debug"
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit console logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

fn parse_delay_seconds(raw: &str) -> Result<f64, String> {
    let seconds: f64 = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a number of seconds"))?;
    Duration::try_from_secs_f64(seconds)
        .map_err(|e| format!("delay must be a non-negative number of seconds, got {raw}: {e}"))?;
    Ok(seconds)
}

impl Args {
    /// Layer the flags over a loaded configuration
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(out) = &self.out {
            config.scrape.output_path.clone_from(out);
        }
        if let Some(sleep) = self.sleep {
            config.scrape.inter_page_delay_seconds = sleep;
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
        if self.json_logs {
            config.logging.json_format = true;
        }
    }

    pub fn scrape_request(&self, config: &AppConfig) -> ScrapeResult<ScrapeRequest> {
        Ok(ScrapeRequest {
            base_url: self.base.clone(),
            max_pages_override: self.max_pages,
            output_path: config.scrape.output_path.clone(),
            inter_page_delay: config.scrape.inter_page_delay()?,
            selectors: config.selectors.clone(),
        })
    }
}

/// Load configuration, initialise logging and run one scrape
pub async fn run(args: Args) -> Result<()> {
    let mut config =
        AppConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    args.apply_to(&mut config);
    config.validate().context("Invalid configuration")?;

    init_logging_with_config(&config.logging)?;

    let client = HttpClient::with_config(config.http.clone())?;
    let request = args.scrape_request(&config)?;

    let outcome = scrape(&client, &request)
        .await
        .with_context(|| format!("Scrape of {} failed", args.base))?;

    info!(
        "✅ {} listing done: {} page(s), {} records",
        outcome.mode,
        outcome.pages_scraped,
        outcome.records.len()
    );
    Ok(())
}

/// Report a fatal error once. It goes through the logger when console
/// logging is up, straight to stderr otherwise.
pub fn report_failure(err: &anyhow::Error) {
    error!("❌ {:#}", err);
    if !console_logging_active() {
        eprintln!("Error: {err:#}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("geekbench-scrape").chain(args.iter().copied()))
    }

    #[test]
    fn test_base_is_required() {
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let args = parse(&[
            "--base",
            "https://browser.geekbench.com/v6/compute",
            "--out",
            "gpu.csv",
            "--sleep",
            "0",
            "--log-level",
            "debug",
            "--json-logs",
        ])
        .unwrap();

        let mut config = AppConfig::default();
        args.apply_to(&mut config);
        assert_eq!(config.scrape.output_path, PathBuf::from("gpu.csv"));
        assert_eq!(config.scrape.inter_page_delay_seconds, 0.0);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json_format);

        let request = args.scrape_request(&config).unwrap();
        assert_eq!(request.inter_page_delay, Duration::ZERO);
        assert_eq!(request.max_pages_override, None);
    }

    #[test]
    fn test_unset_flags_keep_config_values() {
        let args = parse(&["--base", "https://browser.geekbench.com/v4/cpu"]).unwrap();
        let mut config = AppConfig::default();
        args.apply_to(&mut config);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_oversized_configured_delay_is_an_error() {
        let args = parse(&["--base", "https://browser.geekbench.com/v6/cpu"]).unwrap();
        let mut config = AppConfig::default();
        config.scrape.inter_page_delay_seconds = 1e20;

        assert!(config.validate().is_err());
        assert!(args.scrape_request(&config).is_err());
    }

    #[rstest]
    #[case("-1", Some(-1))]
    #[case("0", Some(0))]
    #[case("7", Some(7))]
    fn test_max_pages_accepts_any_integer(#[case] raw: &str, #[case] expected: Option<i64>) {
        let args = parse(&["--base", "https://browser.geekbench.com/v6/cpu", "--max-pages", raw])
            .unwrap();
        assert_eq!(args.max_pages, expected);
    }

    #[rstest]
    #[case("-0.5")]
    #[case("NaN")]
    #[case("inf")]
    #[case("soon")]
    #[case("1e20")]
    fn test_invalid_sleep_is_rejected(#[case] raw: &str) {
        assert!(parse(&["--base", "https://browser.geekbench.com/v6/cpu", "--sleep", raw]).is_err());
    }
}
