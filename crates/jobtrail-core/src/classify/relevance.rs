//! Subject-keyword relevance gate.

/// Decides whether a subject line belongs to a job application thread.
#[derive(Debug, Clone)]
pub struct RelevanceGate {
    keywords: Vec<String>,
}

impl RelevanceGate {
    /// Creates a gate over the given keywords (matched case-insensitively).
    #[must_use]
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// Returns true if the subject contains any keyword.
    #[must_use]
    pub fn is_job_related(&self, subject: &str) -> bool {
        let subject = subject.to_lowercase();
        self.keywords.iter().any(|k| subject.contains(k.as_str()))
    }
}
