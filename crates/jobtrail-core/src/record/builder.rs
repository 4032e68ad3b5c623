//! Assembles a [`JobRecord`] from decoded text.

use chrono::NaiveDate;
use tracing::debug;

use super::model::{JobRecord, UNKNOWN_COMPANY, UNKNOWN_POSITION};
use crate::classify::{RelevanceGate, StatusClassifier};
use crate::config::ExtractionRules;
use crate::decode::DecodedText;
use crate::error::Result;
use crate::extract::{ExtractionContext, Extractor};

/// Runs extraction and classification for one message.
///
/// Immutable once built; share it freely across messages.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    extractor: Extractor,
    classifier: StatusClassifier,
    gate: RelevanceGate,
}

impl RecordBuilder {
    /// Compiles the rules into a builder.
    ///
    /// # Errors
    ///
    /// Returns an error if any extraction pattern is invalid.
    pub fn new(rules: &ExtractionRules) -> Result<Self> {
        Ok(Self {
            extractor: Extractor::new(rules)?,
            classifier: StatusClassifier::new(&rules.status_triggers),
            gate: RelevanceGate::new(&rules.job_keywords),
        })
    }

    /// The relevance gate built from the same rules.
    #[must_use]
    pub const fn gate(&self) -> &RelevanceGate {
        &self.gate
    }

    /// The compiled extractor.
    #[must_use]
    pub const fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Builds a record, or `None` when neither company nor title was found.
    #[must_use]
    pub fn build(&self, text: &DecodedText, applied_date: NaiveDate) -> Option<JobRecord> {
        let ctx = ExtractionContext::new(&text.subject, &text.plain_body);
        let company = self.extractor.company(&ctx);
        let title = self.extractor.title(&ctx);

        if company == UNKNOWN_COMPANY && title == UNKNOWN_POSITION {
            debug!(subject = %text.subject, "Nothing extracted; no record");
            return None;
        }

        Some(JobRecord {
            company,
            title,
            status: self.classifier.classify(&text.subject),
            applied_date,
            notes: text.subject.clone(),
        })
    }
}
