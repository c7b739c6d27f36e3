//! Schema, instance and path model for jsv.
//!
//! Schemas and instances are plain `serde_json::Value`s owned by the caller.
//! This crate adds the read-only views the validator walks over:
//! [`SchemaNode`] for schema documents, [`ValueKind`] for instance runtime
//! types, and [`Path`] for addressing either tree.

/// Structural equality of instance values.
pub mod equal;

/// Runtime types of instance values.
pub mod instance;

/// Paths into schema and instance trees.
pub mod path;

/// Borrowed views over schema documents.
pub mod schema;

pub use equal::deep_equal;
pub use instance::ValueKind;
pub use path::Path;
pub use schema::{NodeKind, SchemaList, SchemaNode, SchemaRef};
