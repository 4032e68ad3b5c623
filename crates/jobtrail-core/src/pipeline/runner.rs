//! Drives messages from a source through extraction into a sink.

use tracing::{debug, info, warn};

use super::sink::{RecordSink, SubmitOutcome};
use super::source::MessageSource;
use crate::config::ExtractionRules;
use crate::decode::{RawMessage, decode};
use crate::error::Result;
use crate::record::{JobRecord, RecordBuilder};

/// Give up on a source that fails this many times in a row.
const MAX_CONSECUTIVE_SOURCE_ERRORS: usize = 16;

/// What happened to one message before submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Subject did not look job-related.
    Irrelevant,
    /// No usable `Date` header.
    Undated,
    /// Neither company nor title could be extracted.
    Empty,
    /// A record ready to submit.
    Record(JobRecord),
}

/// Per-run counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Messages pulled from the source.
    pub seen: usize,
    /// Skipped by the relevance gate.
    pub irrelevant: usize,
    /// Skipped for lack of a delivery date.
    pub undated: usize,
    /// Relevant but nothing extracted.
    pub empty: usize,
    /// Newly stored.
    pub created: usize,
    /// Already stored.
    pub duplicates: usize,
    /// Rejected as malformed.
    pub client_errors: usize,
    /// Store failed internally.
    pub server_errors: usize,
    /// Any other store reply.
    pub unexpected: usize,
    /// Submission never got a reply.
    pub failed: usize,
    /// Messages the source could not read.
    pub source_errors: usize,
}

impl RunSummary {
    /// Records handed to the sink.
    #[must_use]
    pub const fn submitted(&self) -> usize {
        self.created
            + self.duplicates
            + self.client_errors
            + self.server_errors
            + self.unexpected
            + self.failed
    }

    fn count(&mut self, outcome: SubmitOutcome) {
        match outcome {
            SubmitOutcome::Created => self.created += 1,
            SubmitOutcome::AlreadyExists => self.duplicates += 1,
            SubmitOutcome::ClientError => self.client_errors += 1,
            SubmitOutcome::ServerError => self.server_errors += 1,
            SubmitOutcome::Unexpected(_) => self.unexpected += 1,
        }
    }
}

/// Sequential message pipeline.
#[derive(Debug, Clone)]
pub struct Pipeline {
    builder: RecordBuilder,
}

impl Pipeline {
    /// Creates a pipeline around a prepared builder.
    #[must_use]
    pub const fn new(builder: RecordBuilder) -> Self {
        Self { builder }
    }

    /// Compiles `rules` and creates a pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error if any extraction pattern is invalid.
    pub fn from_rules(rules: &ExtractionRules) -> Result<Self> {
        RecordBuilder::new(rules).map(Self::new)
    }

    /// Gates, decodes and extracts one message. Pure.
    #[must_use]
    pub fn process(&self, message: &RawMessage) -> Disposition {
        if !self.builder.gate().is_job_related(&message.subject) {
            return Disposition::Irrelevant;
        }

        let Some(applied_date) = message.delivery_date() else {
            return Disposition::Undated;
        };

        let text = decode(message);
        self.builder
            .build(&text, applied_date)
            .map_or(Disposition::Empty, Disposition::Record)
    }

    /// Pulls every message from `source` and submits each record to `sink`.
    ///
    /// Never aborts on a single message: failures are logged and counted.
    pub async fn run<S, K>(&self, source: &mut S, sink: &K) -> RunSummary
    where
        S: MessageSource + ?Sized,
        K: RecordSink + ?Sized,
    {
        let mut summary = RunSummary::default();
        let mut consecutive_errors = 0;

        loop {
            let message = match source.next_message().await {
                Ok(Some(message)) => message,
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to read message: {e}");
                    summary.source_errors += 1;
                    consecutive_errors += 1;
                    if consecutive_errors >= MAX_CONSECUTIVE_SOURCE_ERRORS {
                        warn!("Giving up after {consecutive_errors} consecutive read failures");
                        break;
                    }
                    continue;
                }
            };
            consecutive_errors = 0;
            summary.seen += 1;

            match self.process(&message) {
                Disposition::Irrelevant => {
                    debug!(subject = %message.subject, "Not job-related");
                    summary.irrelevant += 1;
                }
                Disposition::Undated => {
                    warn!(subject = %message.subject, "Skipping message without a usable Date header");
                    summary.undated += 1;
                }
                Disposition::Empty => {
                    debug!(subject = %message.subject, "No company or title found");
                    summary.empty += 1;
                }
                Disposition::Record(record) => {
                    Self::submit(sink, &record, &mut summary).await;
                }
            }
        }

        info!(
            seen = summary.seen,
            created = summary.created,
            duplicates = summary.duplicates,
            failed = summary.failed,
            "Run complete"
        );
        summary
    }

    async fn submit<K>(sink: &K, record: &JobRecord, summary: &mut RunSummary)
    where
        K: RecordSink + ?Sized,
    {
        match sink.submit(record).await {
            Ok(outcome) => {
                match outcome {
                    SubmitOutcome::Created => info!(
                        company = %record.company,
                        title = %record.title,
                        status = %record.status,
                        "Saved job application"
                    ),
                    SubmitOutcome::AlreadyExists => info!(
                        company = %record.company,
                        title = %record.title,
                        "Job application already recorded"
                    ),
                    other => warn!(
                        company = %record.company,
                        title = %record.title,
                        "Record store replied: {other}"
                    ),
                }
                summary.count(outcome);
            }
            Err(e) => {
                warn!(company = %record.company, "Failed to submit record: {e}");
                summary.failed += 1;
            }
        }
    }
}
