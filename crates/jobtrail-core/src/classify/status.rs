//! Status classification from the subject line.

use crate::config::StatusTrigger;
use crate::record::JobStatus;

/// Maps a subject to a [`JobStatus`] by prioritized keyword triggers.
#[derive(Debug, Clone)]
pub struct StatusClassifier {
    triggers: Vec<StatusTrigger>,
}

impl StatusClassifier {
    /// Creates a classifier. Triggers are checked in order; keywords are lower-cased.
    #[must_use]
    pub fn new(triggers: &[StatusTrigger]) -> Self {
        Self {
            triggers: triggers
                .iter()
                .map(|t| StatusTrigger {
                    status: t.status,
                    keywords: t.keywords.iter().map(|k| k.to_lowercase()).collect(),
                })
                .collect(),
        }
    }

    /// Classifies a subject. Total: anything unmatched is `Applied`.
    #[must_use]
    pub fn classify(&self, subject: &str) -> JobStatus {
        let subject = subject.to_lowercase();
        self.triggers
            .iter()
            .find(|t| {
                t.keywords
                    .iter()
                    .any(|k| !k.is_empty() && subject.contains(k.as_str()))
            })
            .map_or(JobStatus::Applied, |t| t.status)
    }
}
