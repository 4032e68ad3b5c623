//! Message pipeline.
//!
//! Pulls [`RawMessage`](crate::decode::RawMessage)s from a [`MessageSource`],
//! runs gate, decode and extraction, and hands each [`JobRecord`](crate::record::JobRecord)
//! to a [`RecordSink`]. Strictly sequential: each submission is awaited before
//! the next message is pulled.

mod runner;
mod sink;
mod source;

pub use runner::{Disposition, Pipeline, RunSummary};
pub use sink::{RecordSink, SubmitOutcome};
pub use source::{MemorySource, MessageSource};
