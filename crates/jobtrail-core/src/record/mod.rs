//! Job records and their assembly.

mod builder;
mod model;

pub use builder::RecordBuilder;
pub use model::{JobRecord, JobStatus, UNKNOWN_COMPANY, UNKNOWN_POSITION};
