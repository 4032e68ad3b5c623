//! Remote services.

mod api;

pub use api::{ApiClient, DEFAULT_SERVER_URL};
