//! Type and format registries
//!
//! A `Registry` maps names to the checks the dispatcher runs. It is a plain
//! value owned by a [`crate::Validator`]; adding entries needs `&mut`, so
//! registration happens before a validator is shared, and validation only
//! ever reads it.

use core::fmt;

use indexmap::IndexMap;
use jsv_document::instance::string_form;
use regex::Regex;

use crate::error::RegistryError;
use crate::validate::{Context, Validator};

/// A keyword validator. Records its checks on the context and returns
/// whether they all passed.
pub type TypeCheck = dyn Fn(&Validator, &mut Context<'_, '_>) -> bool + Send + Sync;

/// A format validator. Only called when the instance is present.
pub type FormatCheck = dyn Fn(&Context<'_, '_>) -> bool + Send + Sync;

#[derive(Default)]
pub struct Registry {
    types: IndexMap<String, Box<TypeCheck>>,
    formats: IndexMap<String, Box<FormatCheck>>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a keyword validator. Validators run in registration order;
    /// registering an existing name replaces it in place.
    pub fn add_type<F>(&mut self, name: impl Into<String>, check: F) -> &mut Self
    where
        F: Fn(&Validator, &mut Context<'_, '_>) -> bool + Send + Sync + 'static,
    {
        self.types.insert(name.into(), Box::new(check));
        self
    }

    /// Register a format validator.
    pub fn add_format<F>(&mut self, name: impl Into<String>, check: F) -> &mut Self
    where
        F: Fn(&Context<'_, '_>) -> bool + Send + Sync + 'static,
    {
        self.formats.insert(name.into(), Box::new(check));
        self
    }

    /// Register a format that searches the instance's string form with
    /// `regex`. Strings are tested as-is, other values as compact JSON.
    pub fn add_format_regex(&mut self, name: impl Into<String>, regex: Regex) -> &mut Self {
        self.add_format(name, move |ctx: &Context<'_, '_>| {
            ctx.instance()
                .is_some_and(|value| regex.is_match(&string_form(value)))
        })
    }

    /// [`Registry::add_format_regex`] from pattern source.
    pub fn add_format_pattern(
        &mut self,
        name: impl Into<String>,
        pattern: &str,
    ) -> Result<&mut Self, RegistryError> {
        let name = name.into();
        match Regex::new(pattern) {
            Ok(regex) => Ok(self.add_format_regex(name, regex)),
            Err(source) => Err(RegistryError::InvalidFormatPattern { name, source }),
        }
    }

    pub fn types(&self) -> impl Iterator<Item = (&str, &TypeCheck)> {
        self.types.iter().map(|(name, check)| (name.as_str(), check.as_ref()))
    }

    pub fn format(&self, name: &str) -> Option<&FormatCheck> {
        self.formats.get(name).map(|check| check.as_ref())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("types", &self.types.keys().collect::<Vec<_>>())
            .field("formats", &self.formats.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsv_document::SchemaNode;
    use serde_json::json;

    #[test]
    fn test_types_keep_registration_order() {
        let mut registry = Registry::new();
        registry
            .add_type("b", |_: &Validator, _: &mut Context<'_, '_>| true)
            .add_type("a", |_: &Validator, _: &mut Context<'_, '_>| true)
            .add_type("b", |_: &Validator, _: &mut Context<'_, '_>| false);
        let names: Vec<_> = registry.types().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_format_pattern_tests_string_form() {
        let mut registry = Registry::new();
        registry.add_format_pattern("digits", r"^\d+$").unwrap();
        let check = registry.format("digits").unwrap();

        let schema = json!({ "format": "digits" });
        let digits = json!("123");
        let number = json!(123);
        let letters = json!("abc");
        let node = SchemaNode::new(&schema).unwrap();
        assert!(check(&Context::new(node, &digits)));
        assert!(check(&Context::new(node, &number)));
        assert!(!check(&Context::new(node, &letters)));
    }

    #[test]
    fn test_invalid_format_pattern() {
        let mut registry = Registry::new();
        let err = registry.add_format_pattern("broken", "(").unwrap_err();
        assert!(matches!(err, RegistryError::InvalidFormatPattern { ref name, .. } if name == "broken"));
        assert!(registry.format("broken").is_none());
    }
}
