//! `jobtrail` - records job applications found in email
//!
//! Reads `.eml` files from a directory, extracts company, title and status
//! from each job-application message, and posts the records to a job tracker.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod config;
mod mailbox;
mod output;

use anyhow::{Context, Result};
use chrono::{TimeDelta, Utc};
use jobtrail_core::{ApiClient, ExtractionRules, Pipeline, RunSummary};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use mailbox::EmlDirectory;
use output::JsonLinesSink;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging; stdout is reserved for dry-run output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jobtrail=info,jobtrail_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting jobtrail");

    let config = Config::from_env()?;
    let summary = run(&config).await?;

    info!(
        seen = summary.seen,
        created = summary.created,
        duplicates = summary.duplicates,
        irrelevant = summary.irrelevant,
        undated = summary.undated,
        empty = summary.empty,
        failed = summary.failed + summary.client_errors + summary.server_errors + summary.unexpected,
        source_errors = summary.source_errors,
        "Finished"
    );
    Ok(())
}

async fn run(config: &Config) -> Result<RunSummary> {
    let rules = match &config.rules_path {
        Some(path) => ExtractionRules::from_json_file(path)
            .with_context(|| format!("Failed to load rules from {}", path.display()))?,
        None => ExtractionRules::default(),
    };
    let pipeline = Pipeline::from_rules(&rules).context("Invalid extraction rules")?;

    let cutoff = Utc::now() - TimeDelta::hours(i64::from(config.since_hours));
    let mut source = EmlDirectory::open(&config.mail_dir)
        .await
        .with_context(|| format!("Failed to read {}", config.mail_dir.display()))?
        .since(cutoff);
    info!(
        "Processing {} message files delivered since {cutoff}",
        source.remaining()
    );

    if config.dry_run {
        return Ok(pipeline.run(&mut source, &JsonLinesSink::stdout()).await);
    }

    let client = ApiClient::new(config.server_url.as_str()).context("Invalid server URL")?;
    info!("Submitting records to {}", client.endpoint());
    Ok(pipeline.run(&mut source, &client).await)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn dry_run_config(mail_dir: PathBuf) -> Config {
        Config {
            mail_dir,
            server_url: jobtrail_core::DEFAULT_SERVER_URL.to_string(),
            rules_path: None,
            since_hours: 24,
            dry_run: true,
        }
    }

    #[tokio::test]
    async fn test_dry_run_over_directory() {
        let dir = tempfile::tempdir().unwrap();
        let now = Utc::now().to_rfc2822();
        std::fs::write(
            dir.path().join("1.eml"),
            format!("Subject: Your application was sent to Acme Corp\r\nDate: {now}\r\n\r\nThanks"),
        )
        .unwrap();
        std::fs::write(
            dir.path().join("2.eml"),
            format!("Subject: Your weekly digest\r\nDate: {now}\r\n\r\nNews"),
        )
        .unwrap();

        let summary = run(&dry_run_config(dir.path().to_path_buf())).await.unwrap();
        assert_eq!(summary.seen, 2);
        assert_eq!(summary.created, 1);
        assert_eq!(summary.irrelevant, 1);
    }

    #[tokio::test]
    async fn test_bad_rules_file() {
        let dir = tempfile::tempdir().unwrap();
        let rules = dir.path().join("rules.json");
        std::fs::write(&rules, r#"{"title_patterns": [{"pattern": "no group"}]}"#).unwrap();

        let mut config = dry_run_config(dir.path().to_path_buf());
        config.rules_path = Some(rules);
        let err = run(&config).await.unwrap_err();
        assert!(err.to_string().contains("Invalid extraction rules"));
    }
}
