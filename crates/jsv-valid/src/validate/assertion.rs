//! Assertion records
//!
//! An `Assertion` is what a validator writes into a context's ledger. An
//! `AssertionRecord` is the rendered form, with `expected` looked up from
//! the owning context's schema and `actual` defaulted to its instance.

use core::fmt::Display;

use jsv_document::Path;
use serde::Serialize;
use serde_json::Value;

/// One recorded check. Immutable once pushed into a context.
#[derive(Debug, Clone, PartialEq)]
pub struct Assertion {
    pub valid: bool,
    /// Only kept for failing checks.
    pub predicate: Option<String>,
    /// Keyword the check belongs to.
    pub property: Option<String>,
    /// Overrides the context's instance as the reported actual value.
    pub actual: Option<Value>,
    pub schema_path: Path,
    pub instance_path: Path,
}

/// Diagnostic form of an [`Assertion`].
///
/// `Display` renders one line:
/// `<instance path> <property> valid|invalid: <predicate>: expected <X>, was <Y>`,
/// leaving out the parts that are absent. `X` and `Y` are compact JSON; an
/// absent actual value is written as `undefined`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssertionRecord {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<Value>,
    pub schema_path: Path,
    pub instance_path: Path,
}

impl Display for AssertionRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if !self.instance_path.is_root() {
            write!(f, "{} ", self.instance_path)?;
        }
        if let Some(property) = &self.property {
            write!(f, "{property} ")?;
        }
        f.write_str(if self.valid { "valid" } else { "invalid" })?;
        if let Some(predicate) = &self.predicate {
            write!(f, ": {predicate}")?;
        }
        if let Some(expected) = &self.expected {
            write!(f, ": expected {expected}, was ")?;
            match &self.actual {
                Some(actual) => write!(f, "{actual}")?,
                None => f.write_str("undefined")?,
            }
        }
        Ok(())
    }
}
