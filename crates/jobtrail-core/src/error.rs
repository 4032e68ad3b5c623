//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// MIME structure could not be read.
    #[error("MIME error: {0}")]
    Mime(#[from] jobtrail_mime::Error),

    /// An extraction pattern in the rules failed to compile or lacks a capture group.
    #[error("Invalid extraction pattern {pattern:?}: {reason}")]
    InvalidPattern {
        /// The offending pattern source.
        pattern: String,
        /// Why it was rejected.
        reason: String,
    },

    /// HTTP request to the record sink failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Creates an invalid pattern error.
    #[must_use]
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
