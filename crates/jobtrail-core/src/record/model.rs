//! Job record data model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentinel returned when no company could be extracted.
pub const UNKNOWN_COMPANY: &str = "Unknown Company";

/// Sentinel returned when no title could be extracted.
pub const UNKNOWN_POSITION: &str = "Unknown Position";

/// Where an application stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Application submitted or acknowledged.
    #[default]
    Applied,
    /// Interview requested or scheduled.
    Interview,
    /// Offer extended.
    Offer,
    /// Application declined.
    Rejected,
}

impl JobStatus {
    /// Parse from the wire representation. Unknown values map to `Applied`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "interview" => Self::Interview,
            "offer" => Self::Offer,
            "rejected" => Self::Rejected,
            _ => Self::Applied,
        }
    }

    /// Convert to the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Interview => "interview",
            Self::Offer => "offer",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JobStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// A structured job application extracted from one email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Employer name, or [`UNKNOWN_COMPANY`].
    pub company: String,
    /// Position title, or [`UNKNOWN_POSITION`].
    pub title: String,
    /// Application status.
    pub status: JobStatus,
    /// Delivery date of the email (serialized as `YYYY-MM-DD`).
    pub applied_date: NaiveDate,
    /// The original subject line, kept for manual review.
    pub notes: String,
}

impl JobRecord {
    /// Returns true if the company is known.
    #[must_use]
    pub fn has_company(&self) -> bool {
        self.company != UNKNOWN_COMPANY
    }

    /// Returns true if the title is known.
    #[must_use]
    pub fn has_title(&self) -> bool {
        self.title != UNKNOWN_POSITION
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_job_status_roundtrip() {
        for status in [
            JobStatus::Applied,
            JobStatus::Interview,
            JobStatus::Offer,
            JobStatus::Rejected,
        ] {
            assert_eq!(JobStatus::parse(status.as_str()), status);
        }
        assert_eq!(JobStatus::parse("ghosted"), JobStatus::Applied);
    }

    #[test]
    fn test_job_record_wire_shape() {
        let record = JobRecord {
            company: "Acme Corp".to_string(),
            title: "Software Engineer".to_string(),
            status: JobStatus::Interview,
            applied_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            notes: "Interview with Acme Corp".to_string(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "company": "Acme Corp",
                "title": "Software Engineer",
                "status": "interview",
                "applied_date": "2025-01-06",
                "notes": "Interview with Acme Corp",
            })
        );
        assert!(record.has_company());
        assert!(record.has_title());
    }
}
