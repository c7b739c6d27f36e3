use serde::Deserialize;

/// What a new [`crate::Validator`] registers before callers add their own
/// types and formats.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Register the `object`, `array`, `string`, `numeric` and `enum`
    /// keyword validators.
    pub builtin_types: bool,
    /// Register the `date`, `time`, `utc-millisec` and `regex` formats.
    pub builtin_formats: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            builtin_types: true,
            builtin_formats: true,
        }
    }
}
