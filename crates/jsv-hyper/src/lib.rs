//! Operations derived from a successful validation.
//!
//! A [`Correlation`] binds a schema to an instance. Once the instance
//! validates, the schemas that apply to it (the schema itself plus every
//! matching combinator branch) answer three questions:
//!
//! - [`Correlation::subschema`]: which schema governs a property
//! - [`Correlation::coerce`]: the instance with declared defaults filled in
//! - [`Correlation::links`]: the hyper-schema links that apply

mod coerce;
mod correlation;
mod links;
mod subschema;

pub use coerce::merge_defaults;
pub use correlation::Correlation;
pub use links::{Link, LinkTable};
