//! JSON Schema validation over correlation contexts.
//!
//! A [`Validator`] walks a schema and an instance together, one [`Context`]
//! per schema/instance pair, and records every check as an assertion. The
//! result is a [`Validation`]: validity, the surfaced errors with an
//! indented trace, and the set of schemas that apply to the instance.
//!
//! ```
//! use jsv_valid::Validator;
//! use serde_json::json;
//!
//! let schema = json!({ "properties": { "name": { "type": "string" } } });
//! let instance = json!({ "name": 42 });
//!
//! let validator = Validator::default();
//! let validation = validator.validate_value(&schema, &instance).unwrap();
//! assert!(!validation.is_valid());
//! for line in validation.error_trace() {
//!     println!("{line}");
//! }
//! ```

pub mod config;
pub mod error;
mod format;
pub mod pattern;
pub mod registry;
pub mod validate;

pub use config::Config;
pub use error::{RegistryError, ValidationFailed};
pub use registry::{FormatCheck, Registry, TypeCheck};
pub use validate::{
    Assertion, AssertionRecord, Context, Validation, ValidationOutput, Validator,
};
