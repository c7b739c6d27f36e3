//! Case files
//!
//! A case file is a JSON array of groups, in the layout of the
//! JSON-Schema-Test-Suite:
//!
//! ```json
//! [
//!   {
//!     "description": "minimum validation",
//!     "schema": { "minimum": 1.1 },
//!     "tests": [
//!       { "description": "above the minimum is valid", "data": 2.6, "valid": true }
//!     ]
//!   }
//! ]
//! ```
//!
//! A test may also carry `"coerced"`, the instance expected once schema
//! defaults are merged in.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jsv_hyper::Correlation;
use jsv_valid::Validator;
use serde::Deserialize;
use serde_json::Value;

/// A schema and the instances checked against it.
#[derive(Debug, Clone, Deserialize)]
pub struct CaseGroup {
    pub description: String,
    pub schema: Value,
    pub tests: Vec<CaseTest>,
}

/// One instance and whether it should validate.
#[derive(Debug, Clone, Deserialize)]
pub struct CaseTest {
    pub description: String,
    pub data: Value,
    pub valid: bool,
    /// Expected instance after defaults are filled in, if checked.
    #[serde(default)]
    pub coerced: Option<Value>,
}

/// A parsed case file.
#[derive(Debug, Clone)]
pub struct CaseFile {
    pub path: PathBuf,
    pub groups: Vec<CaseGroup>,
}

/// Result of one [`CaseTest`].
#[derive(Debug, Clone)]
pub struct CaseOutcome {
    /// `<group description> :: <test description>`
    pub name: String,
    pub passed: bool,
    /// Why the test failed, with the error trace when the instance was
    /// rejected unexpectedly.
    pub error: Option<String>,
}

impl CaseFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read case file: {}", path.display()))?;
        let groups = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse case file: {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            groups,
        })
    }

    /// Run every test of every group.
    pub fn run(&self, validator: &Validator) -> Vec<CaseOutcome> {
        self.groups
            .iter()
            .flat_map(|group| {
                group
                    .tests
                    .iter()
                    .map(move |test| run_test(validator, group, test))
            })
            .collect()
    }
}

fn run_test(validator: &Validator, group: &CaseGroup, test: &CaseTest) -> CaseOutcome {
    let name = format!("{} :: {}", group.description, test.description);
    let Some(validation) = validator.validate_value(&group.schema, &test.data) else {
        return CaseOutcome {
            name,
            passed: false,
            error: Some("schema is not an object".to_string()),
        };
    };

    let actual = validation.is_valid();
    if actual == test.valid {
        let error = test.coerced.as_ref().and_then(|expected| {
            let coerced = Correlation::new(validator, &group.schema, &test.data).coerce();
            (coerced.as_ref() != Some(expected)).then(|| {
                format!(
                    "expected coerced instance {expected}, got {}",
                    coerced.map_or_else(|| "nothing".to_string(), |v| v.to_string())
                )
            })
        });
        return CaseOutcome {
            name,
            passed: error.is_none(),
            error,
        };
    }

    let error = if actual {
        "expected invalid, but validated".to_string()
    } else {
        format!(
            "expected valid, but failed:\n{}",
            validation.error_trace().join("\n")
        )
    };
    CaseOutcome {
        name,
        passed: false,
        error: Some(error),
    }
}
