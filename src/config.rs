//! Environment-driven configuration
//!
//! - `NO_PAGER`: when set, `log` writes straight to stdout
//! - `TROVE_COMMIT_DATE`: pins the commit timestamp (`%Y-%m-%d %H:%M:%S %z` or RFC 2822)
//! - `TROVE_LOG`: tracing filter directive, `warn` when unset

use anyhow::Context;
use chrono::{DateTime, FixedOffset};

pub const NO_PAGER_ENV: &str = "NO_PAGER";
pub const COMMIT_DATE_ENV: &str = "TROVE_COMMIT_DATE";
pub const LOG_ENV: &str = "TROVE_LOG";

const DEFAULT_LOG_FILTER: &str = "warn";
const COMMIT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    no_pager: bool,
    commit_date: Option<DateTime<FixedOffset>>,
    log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            no_pager: false,
            commit_date: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn load_from_env() -> anyhow::Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup, so tests don't have to touch the
    /// process environment
    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let commit_date = lookup(COMMIT_DATE_ENV)
            .map(|date| Self::parse_commit_date(&date))
            .transpose()?;

        Ok(Config {
            no_pager: lookup(NO_PAGER_ENV).is_some(),
            commit_date,
            log_filter: lookup(LOG_ENV)
                .filter(|filter| !filter.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }

    fn parse_commit_date(date: &str) -> anyhow::Result<DateTime<FixedOffset>> {
        DateTime::parse_from_str(date, COMMIT_DATE_FORMAT)
            .or_else(|_| DateTime::parse_from_rfc2822(date))
            .with_context(|| format!("{COMMIT_DATE_ENV} is not a valid date: {date:?}"))
    }

    pub fn no_pager(&self) -> bool {
        self.no_pager
    }

    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Timestamp for a commit being built right now
    pub fn commit_timestamp(&self) -> DateTime<FixedOffset> {
        self.commit_date
            .unwrap_or_else(|| chrono::Local::now().fixed_offset())
    }
}
