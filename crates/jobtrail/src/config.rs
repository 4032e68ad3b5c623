//! Runtime configuration from the environment.

use std::path::PathBuf;

use anyhow::{Context, Result};
use jobtrail_core::DEFAULT_SERVER_URL;
use tracing::info;

const DEFAULT_SINCE_HOURS: u32 = 24;

/// Settings read from `JOBTRAIL_*` variables (and `.env`, if present).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory of `.eml` files to process.
    pub mail_dir: PathBuf,
    /// Base URL of the job record store.
    pub server_url: String,
    /// Optional JSON file overriding the built-in extraction rules.
    pub rules_path: Option<PathBuf>,
    /// Only messages delivered within this many hours are processed.
    pub since_hours: u32,
    /// Print records as JSON lines instead of submitting them.
    pub dry_run: bool,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mail_dir = get("JOBTRAIL_MAIL_DIR")
            .map(PathBuf::from)
            .context("Required environment variable 'JOBTRAIL_MAIL_DIR' is not set")?;

        let server_url = get("JOBTRAIL_SERVER_URL").unwrap_or_else(|| {
            info!("JOBTRAIL_SERVER_URL not set, using {DEFAULT_SERVER_URL}");
            DEFAULT_SERVER_URL.to_string()
        });

        let since_hours = get("JOBTRAIL_SINCE_HOURS")
            .map(|v| v.trim().parse::<u32>())
            .transpose()
            .context("JOBTRAIL_SINCE_HOURS must be a whole number of hours")?
            .unwrap_or(DEFAULT_SINCE_HOURS);

        Ok(Self {
            mail_dir,
            server_url,
            rules_path: get("JOBTRAIL_RULES").map(PathBuf::from),
            since_hours,
            dry_run: get("JOBTRAIL_DRY_RUN").is_some_and(|v| is_truthy(&v)),
        })
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
