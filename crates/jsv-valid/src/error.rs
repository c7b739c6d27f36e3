//! Error types for the jsv-valid crate
//!
//! Validation failures are not Rust errors: they are assertions recorded in
//! the context tree. The types here cover registry setup and the optional
//! conversion of a finished validation into a `Result`.

use thiserror::Error;

use crate::validate::AssertionRecord;

/// Errors raised while populating a [`crate::Registry`].
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid pattern for format '{name}': {source}")]
    InvalidFormatPattern {
        name: String,
        #[source]
        source: regex::Error,
    },
}

/// An instance that failed validation, detached from the borrowed schema
/// and instance.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("instance is invalid:\n{}", trace.join("\n"))]
pub struct ValidationFailed {
    /// Surfaced error records, in trace order.
    pub errors: Vec<AssertionRecord>,
    /// The indented error trace.
    pub trace: Vec<String>,
}
