//! Extraction configuration.
//!
//! The keyword and pattern lists that drive classification and extraction are
//! plain data. [`ExtractionRules::default`] carries the built-in set; a JSON
//! file can replace any subset of it.

mod rules;

pub use rules::{ExtractionRules, StatusTrigger, TitlePattern};
