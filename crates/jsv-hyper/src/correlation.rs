use std::borrow::Cow;

use jsv_document::path::step;
use jsv_document::{Path, SchemaNode};
use jsv_valid::{Validation, Validator};
use serde_json::Value;
use tracing::debug;

use crate::coerce::{defaults_source, merge_defaults};
use crate::links::LinkTable;
use crate::subschema::collate;

/// A schema bound to an instance.
///
/// The schema is a `Cow` so that schemas synthesized by
/// [`Correlation::subschema`] (an `allOf` of several matches) can be bound
/// as easily as ones borrowed from a document. Every derived operation
/// validates first and answers from the resulting valid-schema set.
#[derive(Debug, Clone)]
pub struct Correlation<'v, 's, 'i> {
    validator: &'v Validator,
    schema: Cow<'s, Value>,
    instance: &'i Value,
}

impl<'v, 's, 'i> Correlation<'v, 's, 'i> {
    pub fn new(validator: &'v Validator, schema: &'s Value, instance: &'i Value) -> Self {
        Self::bind(validator, Cow::Borrowed(schema), instance)
    }

    /// Bind a schema that may be owned, such as one returned by
    /// [`Correlation::subschema`].
    pub fn bind(validator: &'v Validator, schema: Cow<'s, Value>, instance: &'i Value) -> Self {
        Self {
            validator,
            schema,
            instance,
        }
    }

    pub fn schema(&self) -> &Value {
        &self.schema
    }

    pub fn instance(&self) -> &'i Value {
        self.instance
    }

    /// Validate the instance. `None` if the bound schema is not an object.
    pub fn validate(&self) -> Option<Validation<'_, 'i>> {
        self.validator.validate_value(&self.schema, self.instance)
    }

    /// A bound value that is not a schema constrains nothing.
    pub fn is_valid(&self) -> bool {
        self.validate().is_none_or(|v| v.is_valid())
    }

    /// The schema governing property `key` of the instance.
    ///
    /// No match gives `{}`, one match gives that schema, several give
    /// `{"allOf": [...]}` over all of them. An instance that does not
    /// validate has no applicable schemas and gets `{}`.
    pub fn subschema(&self, key: &str) -> Cow<'s, Value> {
        match &self.schema {
            Cow::Borrowed(schema) => {
                let valid_schemas = self.valid_schemas_of(*schema);
                collate(self.validator, &valid_schemas, key)
            }
            Cow::Owned(schema) => {
                let valid_schemas = self.valid_schemas_of(schema);
                Cow::Owned(collate(self.validator, &valid_schemas, key).into_owned())
            }
        }
    }

    /// Walk `path` through the instance, re-deriving the schema at every
    /// step with [`Correlation::subschema`]. `None` if the instance has no
    /// value at `path`.
    pub fn get_path(&self, path: impl Into<Path>) -> Option<Correlation<'v, 's, 'i>> {
        let path = path.into();
        let mut current = self.clone();
        for segment in path.segments() {
            let instance = step(current.instance, segment)?;
            let schema = current.subschema(segment);
            current = Correlation::bind(self.validator, schema, instance);
        }
        Some(current)
    }

    /// The instance with defaults filled in, or `None` if it is invalid.
    ///
    /// The default comes from the first applicable schema that declares
    /// `type` or `default`, falling back to the bound schema itself.
    pub fn coerce(&self) -> Option<Value> {
        let validation = self.validate()?;
        if !validation.is_valid() {
            debug!("not coercing: instance is invalid");
            return None;
        }
        let root = SchemaNode::new(&self.schema)?;
        let source = defaults_source(validation.valid_schemas(), root);
        Some(match source.property("default") {
            Some(default) => merge_defaults(self.instance, default),
            None => self.instance.clone(),
        })
    }

    /// Links of every applicable schema, or `None` if the instance is
    /// invalid.
    pub fn links(&self) -> Option<LinkTable> {
        let validation = self.validate()?;
        if !validation.is_valid() {
            debug!("no links: instance is invalid");
            return None;
        }
        Some(LinkTable::collect(validation.valid_schemas()))
    }

    fn valid_schemas_of<'a>(&self, schema: &'a Value) -> Vec<SchemaNode<'a>> {
        self.validator
            .validate_value(schema, self.instance)
            .map(|validation| validation.valid_schemas().to_vec())
            .unwrap_or_default()
    }
}
