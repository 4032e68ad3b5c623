//! Subject-line classifiers.
//!
//! Both are plain substring tests over the lower-cased subject:
//! - [`RelevanceGate`] decides whether a message enters extraction at all
//! - [`StatusClassifier`] picks the application status, defaulting to applied

mod relevance;
mod status;

pub use relevance::RelevanceGate;
pub use status::StatusClassifier;
