//! Configuration infrastructure
//!
//! Settings are layered, later sources winning:
//! 1. built-in defaults (the `defaults` module)
//! 2. user config file `<config dir>/geekbench-scrape/config.{toml,json,yaml}`
//! 3. an explicit `--config <path>` file
//! 4. `GBSCRAPE_*` environment variables, `__` between nesting levels
//!    (e.g. `GBSCRAPE_HTTP__TIMEOUT_SECONDS=10`)
//!
//! Command-line flags are applied on top by the caller.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub use crate::infrastructure::http_client::HttpClientConfig;
pub use crate::infrastructure::parsing::ListingSelectors;
use crate::infrastructure::scrape_error::{ScrapeError, ScrapeResult};

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub http: HttpClientConfig,
    pub scrape: ScrapeDefaults,
    pub logging: LoggingConfig,
    pub selectors: ListingSelectors,
}

/// Defaults for the scrape run itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeDefaults {
    /// Output CSV path when `--out` is not given
    pub output_path: PathBuf,
    /// Pause after every listing page, in seconds
    pub inter_page_delay_seconds: f64,
}

impl ScrapeDefaults {
    /// The inter-page delay as a [`Duration`]; negative, non-finite and
    /// out-of-range values are rejected
    pub fn inter_page_delay(&self) -> ScrapeResult<Duration> {
        let seconds = self.inter_page_delay_seconds;
        Duration::try_from_secs_f64(seconds).map_err(|e| {
            ScrapeError::config(format!(
                "scrape.inter_page_delay_seconds must be a non-negative number of seconds, got {seconds}: {e}"
            ))
        })
    }
}

impl Default for ScrapeDefaults {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(defaults::OUTPUT_PATH),
            inter_page_delay_seconds: defaults::INTER_PAGE_DELAY_SECONDS,
        }
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted console logs
    pub json_format: bool,

    /// Enable console (stderr) output
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory for the log file; defaults to `logs/` next to the executable
    pub log_dir: Option<PathBuf>,

    pub file_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            log_dir: None,
            file_name: defaults::LOG_FILE_NAME.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the user config dir, an optional explicit
    /// file and the process environment
    pub fn load(explicit: Option<&Path>) -> ScrapeResult<Self> {
        Self::load_with_env(explicit, None)
    }

    /// Same as [`AppConfig::load`], with the environment replaced by `env`
    /// when given (keys are full variable names, e.g. `GBSCRAPE_HTTP__MAX_ATTEMPTS`)
    pub fn load_with_env(
        explicit: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> ScrapeResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(user_file) = Self::user_config_file() {
            debug!("Looking for user config at {:?}", user_file);
            builder = builder.add_source(config::File::with_name(&user_file.to_string_lossy()).required(false));
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ScrapeError::config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(defaults::ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// `<config dir>/geekbench-scrape/config`, extension resolved by the loader
    pub fn user_config_file() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(defaults::CONFIG_DIR_NAME).join("config"))
    }

    pub fn validate(&self) -> ScrapeResult<()> {
        if self.http.max_attempts == 0 {
            return Err(ScrapeError::config("http.max_attempts must be greater than 0"));
        }
        if self.http.timeout_seconds == 0 {
            return Err(ScrapeError::config("http.timeout_seconds must be greater than 0"));
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(ScrapeError::config("http.user_agent must not be empty"));
        }
        self.scrape.inter_page_delay()?;
        if !self.logging.console_output && !self.logging.file_output {
            return Err(ScrapeError::config("No logging output configured"));
        }
        self.selectors.validate()
    }
}

/// Default configuration values
pub mod defaults {
    /// Browser-like user agent; the listing site turns away plain clients
    pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

    pub const ACCEPT: &str =
        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

    pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

    /// Per-request deadline
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;

    /// First try plus two retries
    pub const MAX_ATTEMPTS: u32 = 3;

    /// Linear backoff unit: 1s after the first failure, 2s after the second
    pub const RETRY_BACKOFF_MS: u64 = 1000;

    pub const OUTPUT_PATH: &str = "geekbench_results.csv";

    pub const INTER_PAGE_DELAY_SECONDS: f64 = 0.5;

    pub const LOG_LEVEL: &str = "info";
    pub const LOG_JSON_FORMAT: bool = false;
    pub const LOG_CONSOLE_OUTPUT: bool = true;
    pub const LOG_FILE_OUTPUT: bool = false;
    pub const LOG_FILE_NAME: &str = "geekbench-scrape.log";

    pub const ENV_PREFIX: &str = "GBSCRAPE";
    pub const CONFIG_DIR_NAME: &str = "geekbench-scrape";
}
