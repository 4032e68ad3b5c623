//! Extraction rule data: keyword lists and pattern sources.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::record::JobStatus;

/// Keywords that map a subject to a status, checked in list order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTrigger {
    /// Status assigned when any keyword matches.
    pub status: JobStatus,
    /// Lower-case substrings to look for.
    pub keywords: Vec<String>,
}

impl StatusTrigger {
    fn new(status: JobStatus, keywords: &[&str]) -> Self {
        Self {
            status,
            keywords: strings(keywords),
        }
    }
}

/// A title pattern and its post-processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitlePattern {
    /// Regex source; capture group 1 is the title.
    pub pattern: String,
    /// Keep only the words after the last standalone "for" in the capture.
    #[serde(default)]
    pub last_clause: bool,
}

impl TitlePattern {
    fn new(pattern: &str, last_clause: bool) -> Self {
        Self {
            pattern: pattern.to_string(),
            last_clause,
        }
    }
}

/// Process-wide extraction configuration.
///
/// Every list is data, not code: load a JSON file to override any field and
/// the rest keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionRules {
    /// Subject substrings that mark a message as job-related.
    pub job_keywords: Vec<String>,
    /// Status triggers in priority order.
    pub status_triggers: Vec<StatusTrigger>,
    /// Job-board subject templates, tried first.
    pub company_platform_patterns: Vec<String>,
    /// Trailing platform tags stripped from platform matches.
    pub platform_suffixes: Vec<String>,
    /// Generic subject patterns.
    pub company_generic_patterns: Vec<String>,
    /// Patterns applied to each body line.
    pub company_body_patterns: Vec<String>,
    /// Subject phrase that enables the "word before team" fallback.
    pub company_team_phrase: String,
    /// Title patterns for the subject and for body lines.
    pub title_patterns: Vec<TitlePattern>,
    /// Common title vocabulary, in priority order.
    pub common_titles: Vec<String>,
    /// Body line after which the job-board layout lists the title.
    pub structural_marker: String,
    /// How many non-empty lines after the marker are considered.
    ///
    /// `1` is the plain job-board layout, where the title is the very next
    /// non-empty line. Larger values look past location and date footers.
    pub structural_lookahead: usize,
    /// City/region/country tokens that disqualify a title candidate.
    pub location_tokens: Vec<String>,
    /// Date fragments that disqualify a title candidate.
    pub date_tokens: Vec<String>,
}

impl Default for ExtractionRules {
    fn default() -> Self {
        Self {
            job_keywords: strings(&["application", "thank you for apply", "next step"]),
            status_triggers: vec![
                StatusTrigger::new(JobStatus::Interview, &["interview"]),
                StatusTrigger::new(JobStatus::Offer, &["offer", "congratulations"]),
                StatusTrigger::new(JobStatus::Rejected, &["reject", "unfortunately"]),
                StatusTrigger::new(JobStatus::Applied, &["received", "thank you"]),
            ],
            company_platform_patterns: strings(&[
                r"(?i)your application was sent to\s+(.+)",
                r"(?i)application sent\b.*?\bat\s+(.+)",
                r"(?i)^(.+?):\s*your application",
                r"(?i)thank you for applying (?:to|at)\s+(.+?)(?:\s+for\b|\s+-\s|[!.,|]|$)",
            ]),
            platform_suffixes: strings(&[" - LinkedIn", " via LinkedIn"]),
            company_generic_patterns: strings(&[
                r"(?i)from\s+([A-Za-z\s&.]+?)(?:\s+team|\s+careers|\s+hiring|$)",
                r"(?i)at\s+([A-Za-z\s&.]+?)(?:\s+team|\s+careers|\s+-|$)",
                r"(?i)([A-Za-z\s&.]+?)\s+(?:team|careers|hiring|hr)",
                r"(?i)^([A-Za-z\s&.]+?)\s+(?:-|:)",
            ]),
            company_body_patterns: strings(&[
                r"(?i)from\s+([A-Za-z\s&.]+?)\s+team",
                r"(?i)at\s+([A-Za-z\s&.]+?)[,.]",
                r"(?i)([A-Za-z\s&.]+?)\s+careers",
                r"(?i)([A-Za-z\s&.]+?)\s+hiring",
            ]),
            company_team_phrase: "thank you for your application".to_string(),
            title_patterns: vec![
                TitlePattern::new(r"(?i)for\s+the\s+([^-]+?)(?:\s+position|\s+role)", false),
                TitlePattern::new(r"(?i)position:\s+([^-\n]+?)(?:\s+at|\s+-|$)", false),
                TitlePattern::new(r"(?i)role:\s+([^-\n]+?)(?:\s+at|\s+-|$)", false),
                TitlePattern::new(r"(?i)([A-Za-z\s]+?)\s+position", true),
                TitlePattern::new(r"(?i)([A-Za-z\s]+?)\s+role", true),
            ],
            common_titles: strings(&[
                "software engineer",
                "software developer",
                "backend developer",
                "developer",
                "programmer",
                "business analyst",
                "analyst",
                "manager",
                "director",
                "consultant",
                "specialist",
                "coordinator",
                "associate",
                "senior",
                "junior",
                "intern",
                "architect",
            ]),
            structural_marker: "your application was sent to".to_string(),
            structural_lookahead: 3,
            location_tokens: strings(&[
                "toronto",
                "vancouver",
                "montreal",
                "ottawa",
                "calgary",
                "edmonton",
                "waterloo",
                "mississauga",
                "ontario",
                "quebec",
                "british columbia",
                "alberta",
                "canada",
                "new york",
                "san francisco",
                "seattle",
                "austin",
                "boston",
                "chicago",
                "los angeles",
                "california",
                "united states",
                "london",
                "remote",
                "hybrid",
                "on-site",
            ]),
            date_tokens: strings(&["applied on", "2024", "2025"]),
        }
    }
}

impl ExtractionRules {
    /// Parses rules from JSON. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Loads rules from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read rules {}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}
