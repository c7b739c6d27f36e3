//! Instance validation
//!
//! # Architecture
//!
//! Validation is a recursive walk over `Context`s:
//! - `Validator`: Owns the type/format `Registry` and dispatches each context
//! - Type validators: `Fn(&Validator, &mut Context) -> bool`, one per keyword family
//! - Combinators: `allOf`/`anyOf`/`oneOf`/`not`, each branch in its own subcontext
//!
//! # Diagnostics
//!
//! Every check becomes an `Assertion` in the context that made it. Children
//! are adopted by the parent together with the assertion that consumed
//! their result, so `errors()` can tell a failure on the path to the root
//! failure from a speculative branch failure that did not matter.
//!
//! # Valid-Schema Set
//!
//! When a context validates, the dispatcher reports its own schema followed
//! by the sets of the combinator branches that matched. Derived operations
//! (defaults, links, property schemas) read from that set.

mod array;
mod assertion;
mod combinator;
mod context;
mod enumeration;
mod numeric;
mod object;
mod string;

pub use assertion::{Assertion, AssertionRecord};
pub use context::Context;

use jsv_document::instance::matches_type;
use jsv_document::{SchemaNode, ValueKind};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::Config;
use crate::error::ValidationFailed;
use crate::format;
use crate::pattern::PatternCache;
use crate::registry::Registry;

// =============================================================================
// Validator
// =============================================================================

/// Validates instances against schemas using a populated [`Registry`].
///
/// Populate the registry through [`Validator::registry_mut`] first; after
/// that the validator is only read and can be shared across threads.
#[derive(Debug)]
pub struct Validator {
    registry: Registry,
    patterns: PatternCache,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Validator {
    pub fn new(config: Config) -> Self {
        let mut registry = Registry::new();
        if config.builtin_types {
            registry
                .add_type("object", object::validate)
                .add_type("array", array::validate)
                .add_type("string", string::validate)
                .add_type("numeric", numeric::validate)
                .add_type("enum", enumeration::validate);
        }
        if config.builtin_formats {
            format::register_builtin(&mut registry);
        }
        Self {
            registry,
            patterns: PatternCache::new(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Compiled-pattern cache shared by every validation run.
    pub fn patterns(&self) -> &PatternCache {
        &self.patterns
    }

    /// Validate `instance` against the schema rooted at `schema`.
    pub fn validate<'s, 'i>(&self, schema: SchemaNode<'s>, instance: &'i Value) -> Validation<'s, 'i> {
        debug!("validating instance against schema");
        let mut context = Context::new(schema, instance);
        let mut valid_schemas = Vec::new();
        let valid = self.validate_with(&mut context, &mut valid_schemas);
        debug!("validation finished: valid = {}", valid);
        Validation {
            context,
            valid_schemas,
        }
    }

    /// [`Validator::validate`] over raw values. `None` if `schema` is not a
    /// JSON object.
    pub fn validate_value<'s, 'i>(
        &self,
        schema: &'s Value,
        instance: &'i Value,
    ) -> Option<Validation<'s, 'i>> {
        SchemaNode::new(schema).map(|schema| self.validate(schema, instance))
    }

    /// Validate a context, discarding its valid-schema set.
    ///
    /// This is what type validators call on the subcontexts they create.
    pub fn validate_context(&self, ctx: &mut Context<'_, '_>) -> bool {
        let mut valid_schemas = Vec::new();
        self.validate_with(ctx, &mut valid_schemas)
    }

    /// Validate a context. If it ends up valid, its own schema and the
    /// schemas of the combinator branches that matched are appended to
    /// `valid_schemas`.
    pub fn validate_with<'s>(
        &self,
        ctx: &mut Context<'s, '_>,
        valid_schemas: &mut Vec<SchemaNode<'s>>,
    ) -> bool {
        let Some(schema) = ctx.schema() else {
            return true;
        };
        trace!(
            "validating schema path '{}' at instance path '{}'",
            ctx.schema_path(),
            ctx.instance_path()
        );

        // Keyword validators run even when `type` fails; each one ignores
        // instances of a runtime type it does not handle.
        if let Some(instance) = ctx.instance() {
            self.check_type(ctx, instance);
        }
        self.run_type_validators(ctx);
        if ctx.instance().is_some() {
            self.check_format(ctx);
        }
        let branch_schemas = combinator::validate(self, ctx);

        let valid = ctx.is_valid();
        if valid {
            valid_schemas.push(schema);
            valid_schemas.extend(branch_schemas);
        }
        valid
    }

    /// The `type` keyword. A list means any of its names; an absent or
    /// malformed keyword constrains nothing.
    fn check_type(&self, ctx: &mut Context<'_, '_>, instance: &Value) {
        let names: Vec<&str> = match ctx.property("type") {
            Some(Value::String(name)) => vec![name.as_str()],
            Some(Value::Array(names)) => names.iter().filter_map(Value::as_str).collect(),
            _ => return,
        };
        if names.is_empty() {
            return;
        }
        let matched = names.iter().any(|name| matches_type(instance, name));
        let actual = ValueKind::of(instance).name();
        ctx.assert_actual(matched, "does not match type", "type", Value::from(actual));
    }

    fn run_type_validators(&self, ctx: &mut Context<'_, '_>) {
        for (name, check) in self.registry.types() {
            let recorded = ctx.assertions().len();
            let valid = check(self, &mut *ctx);
            let reported = ctx.assertions()[recorded..].iter().any(|a| !a.valid);
            if !valid && !reported {
                ctx.assert(false, &format!("rejected by {name} validator"), None);
            }
        }
    }

    fn check_format(&self, ctx: &mut Context<'_, '_>) {
        let Some(name) = ctx.property("format").and_then(Value::as_str) else {
            return;
        };
        match self.registry.format(name) {
            Some(check) => {
                let valid = check(&*ctx);
                ctx.assert(valid, "does not match format", "format");
            }
            None => {
                ctx.assert(false, "unknown format", "format");
            }
        }
    }
}

// =============================================================================
// Validation
// =============================================================================

/// The outcome of validating one instance: the root context tree plus the
/// valid-schema set.
#[derive(Debug, Clone)]
pub struct Validation<'s, 'i> {
    context: Context<'s, 'i>,
    valid_schemas: Vec<SchemaNode<'s>>,
}

/// Owned summary of a [`Validation`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationOutput {
    pub is_valid: bool,
    pub errors: Vec<AssertionRecord>,
}

impl<'s, 'i> Validation<'s, 'i> {
    pub fn is_valid(&self) -> bool {
        self.context.is_valid()
    }

    pub fn errors(&self) -> Vec<AssertionRecord> {
        self.context.errors()
    }

    pub fn error_trace(&self) -> Vec<String> {
        self.context.error_trace()
    }

    /// Schemas that apply to the instance, own schema first. Empty when
    /// the instance is invalid.
    pub fn valid_schemas(&self) -> &[SchemaNode<'s>] {
        &self.valid_schemas
    }

    pub fn context(&self) -> &Context<'s, 'i> {
        &self.context
    }

    pub fn output(&self) -> ValidationOutput {
        ValidationOutput {
            is_valid: self.is_valid(),
            errors: self.errors(),
        }
    }

    pub fn into_result(self) -> Result<(), ValidationFailed> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(ValidationFailed {
                errors: self.errors(),
                trace: self.error_trace(),
            })
        }
    }
}
