//! Company and title extraction.
//!
//! Both extractors are ordered cascades over the subject, then the body. Every
//! pattern is compiled once in [`Extractor::new`]; extraction itself is pure and
//! never fails. A miss yields the sentinel, never an empty string.
//!
//! # Example
//!
//! ```
//! use jobtrail_core::config::ExtractionRules;
//! use jobtrail_core::extract::Extractor;
//!
//! let extractor = Extractor::new(&ExtractionRules::default()).unwrap();
//! let subject = "Thank you for applying to Acme Corp for Software Engineer position";
//! assert_eq!(extractor.extract_company(subject, ""), "Acme Corp");
//! assert_eq!(extractor.extract_title(subject, ""), "Software Engineer");
//! ```

mod cascade;
mod company;
mod filter;
mod title;

pub use cascade::{Bounds, Cascade, Cleanup};
pub use company::CompanyExtractor;
pub use filter::LocationFilter;
pub use title::TitleExtractor;

use crate::config::ExtractionRules;
use crate::error::Result;

/// Per-message view shared by the extractors.
///
/// Lower-cases the subject and splits the body into trimmed lines once.
#[derive(Debug, Clone)]
pub struct ExtractionContext<'a> {
    /// The subject line as received.
    pub subject: &'a str,
    subject_lower: String,
    lines: Vec<&'a str>,
}

impl<'a> ExtractionContext<'a> {
    /// Builds the view for one message.
    #[must_use]
    pub fn new(subject: &'a str, body: &'a str) -> Self {
        Self {
            subject,
            subject_lower: subject.to_lowercase(),
            lines: body.lines().map(str::trim).collect(),
        }
    }

    /// The subject, lower-cased.
    #[must_use]
    pub fn subject_lower(&self) -> &str {
        &self.subject_lower
    }

    /// Body lines, trimmed. Empty lines are kept so positions stay meaningful.
    #[must_use]
    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }
}

/// Compiled company and title extractors.
#[derive(Debug, Clone)]
pub struct Extractor {
    company: CompanyExtractor,
    title: TitleExtractor,
}

impl Extractor {
    /// Compiles every pattern in `rules`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPattern`] if any pattern fails to compile
    /// or lacks capture group 1.
    pub fn new(rules: &ExtractionRules) -> Result<Self> {
        Ok(Self {
            company: CompanyExtractor::new(rules)?,
            title: TitleExtractor::new(rules)?,
        })
    }

    /// Company for a prepared context.
    #[must_use]
    pub fn company(&self, ctx: &ExtractionContext<'_>) -> String {
        self.company.extract(ctx)
    }

    /// Title for a prepared context.
    #[must_use]
    pub fn title(&self, ctx: &ExtractionContext<'_>) -> String {
        self.title.extract(ctx)
    }

    /// Extracts the company, or `"Unknown Company"`.
    #[must_use]
    pub fn extract_company(&self, subject: &str, body: &str) -> String {
        self.company(&ExtractionContext::new(subject, body))
    }

    /// Extracts the position title, or `"Unknown Position"`.
    #[must_use]
    pub fn extract_title(&self, subject: &str, body: &str) -> String {
        self.title(&ExtractionContext::new(subject, body))
    }
}
