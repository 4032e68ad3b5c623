//! # jobtrail-core
//!
//! Turns job-application email into structured job records.
//!
//! This crate provides:
//! - **Decoding** - best plain-text rendition of a (multipart) message body
//! - **Classification** - relevance gate and application status from the subject
//! - **Extraction** - company and position title by ordered pattern cascades
//! - **Records** - the [`JobRecord`] model and its builder
//! - **Pipeline** - sequential source → extraction → sink runner
//! - **Service** - HTTP client for the record store
//!
//! Keyword and pattern lists live in [`ExtractionRules`] and can be loaded
//! from JSON.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod classify;
pub mod config;
pub mod decode;
mod error;
pub mod extract;
pub mod pipeline;
pub mod record;
pub mod service;

pub use classify::{RelevanceGate, StatusClassifier};
pub use config::{ExtractionRules, StatusTrigger, TitlePattern};
pub use decode::{DecodedText, RawMessage, decode, decode_body, sanitize_html};
pub use error::{Error, Result};
pub use extract::{ExtractionContext, Extractor};
pub use pipeline::{
    Disposition, MemorySource, MessageSource, Pipeline, RecordSink, RunSummary, SubmitOutcome,
};
pub use record::{JobRecord, JobStatus, RecordBuilder, UNKNOWN_COMPANY, UNKNOWN_POSITION};
pub use service::{ApiClient, DEFAULT_SERVER_URL};
