//! Outbound side: where records go.

use async_trait::async_trait;

use crate::error::Result;
use crate::record::JobRecord;

/// How the record store answered a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmitOutcome {
    /// Stored (HTTP 200/201).
    Created,
    /// Already present (HTTP 409).
    AlreadyExists,
    /// The store rejected the record as malformed (HTTP 400).
    ClientError,
    /// The store failed internally (HTTP 500).
    ServerError,
    /// Any other status code.
    Unexpected(u16),
}

impl SubmitOutcome {
    /// Maps an HTTP status code to an outcome.
    #[must_use]
    pub const fn from_status(code: u16) -> Self {
        match code {
            200 | 201 => Self::Created,
            409 => Self::AlreadyExists,
            400 => Self::ClientError,
            500 => Self::ServerError,
            other => Self::Unexpected(other),
        }
    }

    /// Returns true if the record is now in the store, new or not.
    #[must_use]
    pub const fn is_stored(&self) -> bool {
        matches!(self, Self::Created | Self::AlreadyExists)
    }
}

impl std::fmt::Display for SubmitOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => f.write_str("created"),
            Self::AlreadyExists => f.write_str("already exists"),
            Self::ClientError => f.write_str("bad request"),
            Self::ServerError => f.write_str("server error"),
            Self::Unexpected(code) => write!(f, "unexpected status {code}"),
        }
    }
}

/// Destination for extracted records.
///
/// `Err` means the submission never got an answer (transport failure).
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Submits one record.
    async fn submit(&self, record: &JobRecord) -> Result<SubmitOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert_eq!(SubmitOutcome::from_status(200), SubmitOutcome::Created);
        assert_eq!(SubmitOutcome::from_status(201), SubmitOutcome::Created);
        assert_eq!(SubmitOutcome::from_status(409), SubmitOutcome::AlreadyExists);
        assert_eq!(SubmitOutcome::from_status(400), SubmitOutcome::ClientError);
        assert_eq!(SubmitOutcome::from_status(500), SubmitOutcome::ServerError);
        assert_eq!(SubmitOutcome::from_status(503), SubmitOutcome::Unexpected(503));
        assert_eq!(SubmitOutcome::from_status(204), SubmitOutcome::Unexpected(204));
    }

    #[test]
    fn test_display() {
        assert_eq!(SubmitOutcome::AlreadyExists.to_string(), "already exists");
        assert_eq!(
            SubmitOutcome::Unexpected(418).to_string(),
            "unexpected status 418"
        );
        assert!(SubmitOutcome::AlreadyExists.is_stored());
        assert!(!SubmitOutcome::ServerError.is_stored());
    }
}
