//! Correlation context
//!
//! `Context` pairs a schema node with an instance value at a dual path
//! (schema path, instance path) and owns the ledger of assertions recorded
//! against that pair. Validators descend by creating subcontexts, validating
//! them, and handing them back to the parent together with the assertion
//! that consumed their result. The resulting tree is immutable once
//! validation returns; `errors()` and `error_trace()` are pure folds over it.

use jsv_document::{Path, SchemaNode, SchemaRef};
use serde_json::{Map, Value};

use super::assertion::{Assertion, AssertionRecord};

// =============================================================================
// Context
// =============================================================================

/// A schema/instance pair bound to its paths, plus its assertion ledger.
#[derive(Debug, Clone)]
pub struct Context<'s, 'i> {
    schema: Option<SchemaNode<'s>>,
    instance: Option<&'i Value>,
    schema_path: Path,
    instance_path: Path,
    valid: bool,
    assertions: Vec<Assertion>,
    children: Vec<Subcontext<'s, 'i>>,
}

/// A child context, linked to the parent assertion that consumed it.
#[derive(Debug, Clone)]
struct Subcontext<'s, 'i> {
    link: usize,
    context: Context<'s, 'i>,
}

impl<'s, 'i> Context<'s, 'i> {
    /// Create a root context.
    pub fn new(schema: SchemaNode<'s>, instance: &'i Value) -> Self {
        Self::with_parts(Some(schema), Some(instance), Path::root(), Path::root())
    }

    fn with_parts(
        schema: Option<SchemaNode<'s>>,
        instance: Option<&'i Value>,
        schema_path: Path,
        instance_path: Path,
    ) -> Self {
        Self {
            schema,
            instance,
            schema_path,
            instance_path,
            valid: true,
            assertions: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Descend to a child context.
    ///
    /// Both paths are relative to this context; pass `Path::root()` to stay
    /// on the current node. A schema path that does not lead to a schema
    /// yields a child with no schema, which validates everything. An
    /// instance path that does not resolve yields an absent instance.
    ///
    /// The child is detached; hand it back with [`Context::assert_subcontext`]
    /// or [`Context::assert_children`] so it becomes part of the diagnostics.
    pub fn subcontext(
        &self,
        schema_path: impl Into<Path>,
        instance_path: impl Into<Path>,
    ) -> Context<'s, 'i> {
        let schema_rel = schema_path.into();
        let instance_rel = instance_path.into();
        let schema = self.schema.and_then(|s| s.subschema(&schema_rel));
        let instance = self.instance.and_then(|v| instance_rel.resolve(v));
        Self::with_parts(
            schema,
            instance,
            self.schema_path.join(&schema_rel),
            self.instance_path.join(&instance_rel),
        )
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn schema(&self) -> Option<SchemaNode<'s>> {
        self.schema
    }

    /// The instance value, or `None` if nothing exists at this path.
    pub fn instance(&self) -> Option<&'i Value> {
        self.instance
    }

    pub fn schema_path(&self) -> &Path {
        &self.schema_path
    }

    pub fn instance_path(&self) -> &Path {
        &self.instance_path
    }

    /// Validity folded over every assertion recorded so far. Once false,
    /// stays false.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The raw value the schema declares for a keyword.
    pub fn property(&self, name: &str) -> Option<&'s Value> {
        self.schema.and_then(|s| s.property(name))
    }

    /// A keyword holding a schema or a list of schemas.
    pub fn get(&self, keyword: &str) -> Option<SchemaRef<'s>> {
        self.schema.and_then(|s| s.get(keyword))
    }

    /// A keyword holding a mapping (`properties`, `dependencies`, ...).
    pub fn get_map(&self, keyword: &str) -> Option<&'s Map<String, Value>> {
        self.schema.and_then(|s| s.get_map(keyword))
    }

    /// Assertions recorded directly in this context.
    pub fn assertions(&self) -> &[Assertion] {
        &self.assertions
    }

    /// Child contexts adopted by this context, in adoption order.
    pub fn subcontexts(&self) -> impl Iterator<Item = &Context<'s, 'i>> {
        self.children.iter().map(|c| &c.context)
    }

    // -------------------------------------------------------------------------
    // Recording
    // -------------------------------------------------------------------------

    /// Record one check and fold it into this context's validity.
    ///
    /// Returns `valid` so checks can be chained.
    pub fn assert<'p>(
        &mut self,
        valid: bool,
        predicate: &str,
        property: impl Into<Option<&'p str>>,
    ) -> bool {
        self.push(valid, predicate, property.into(), None)
    }

    /// Like [`Context::assert`], reporting `actual` instead of the instance.
    pub fn assert_actual<'p>(
        &mut self,
        valid: bool,
        predicate: &str,
        property: impl Into<Option<&'p str>>,
        actual: Value,
    ) -> bool {
        self.push(valid, predicate, property.into(), Some(actual))
    }

    /// Record the validity of a validated subcontext and adopt it.
    pub fn assert_subcontext<'p>(
        &mut self,
        child: Context<'s, 'i>,
        predicate: &str,
        property: impl Into<Option<&'p str>>,
    ) -> bool {
        let valid = child.is_valid();
        self.assert_children(valid, [child], predicate, property)
    }

    /// Record one check whose outcome was decided from several subcontexts
    /// (a combinator group) and adopt all of them.
    ///
    /// The children are only reported by [`Context::errors`] if this check
    /// fails.
    pub fn assert_children<'p>(
        &mut self,
        valid: bool,
        children: impl IntoIterator<Item = Context<'s, 'i>>,
        predicate: &str,
        property: impl Into<Option<&'p str>>,
    ) -> bool {
        let link = self.assertions.len();
        self.push(valid, predicate, property.into(), None);
        self.children
            .extend(children.into_iter().map(|context| Subcontext { link, context }));
        valid
    }

    fn push(
        &mut self,
        valid: bool,
        predicate: &str,
        property: Option<&str>,
        actual: Option<Value>,
    ) -> bool {
        self.valid &= valid;
        self.assertions.push(Assertion {
            valid,
            predicate: (!valid).then(|| predicate.to_string()),
            property: property.map(str::to_string),
            actual,
            schema_path: self.schema_path.clone(),
            instance_path: self.instance_path.clone(),
        });
        valid
    }

    // -------------------------------------------------------------------------
    // Diagnostics
    // -------------------------------------------------------------------------

    /// Render one of this context's assertions.
    pub fn record(&self, assertion: &Assertion) -> AssertionRecord {
        let property = assertion.property.clone();
        let expected = property
            .as_deref()
            .and_then(|p| self.property(p))
            .cloned();
        let actual = assertion
            .actual
            .clone()
            .or_else(|| self.instance.cloned());
        AssertionRecord {
            valid: assertion.valid,
            predicate: assertion.predicate.clone(),
            property,
            expected,
            actual,
            schema_path: assertion.schema_path.clone(),
            instance_path: assertion.instance_path.clone(),
        }
    }

    /// Every assertion recorded directly in this context, rendered.
    pub fn records(&self) -> Vec<AssertionRecord> {
        self.assertions.iter().map(|a| self.record(a)).collect()
    }

    /// Failed assertions on the path to this context's failure.
    ///
    /// Only invalid contexts contribute. Within an invalid context, a
    /// subcontext is visited only when the assertion it was adopted with
    /// failed, so a failing `anyOf` arm whose sibling matched is never
    /// reported. Order is pre-order: each failed assertion is followed by the
    /// errors of the subcontexts behind it.
    pub fn errors(&self) -> Vec<AssertionRecord> {
        let mut out = Vec::new();
        self.collect_errors(0, &mut out);
        out.into_iter().map(|(_, record)| record).collect()
    }

    /// [`Context::errors`] as indented lines, two spaces per level of
    /// descent below this context.
    pub fn error_trace(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_errors(0, &mut out);
        out.into_iter()
            .map(|(depth, record)| format!("{}{}", " ".repeat(depth * 2), record))
            .collect()
    }

    fn collect_errors(&self, depth: usize, out: &mut Vec<(usize, AssertionRecord)>) {
        if self.valid {
            return;
        }
        for (index, assertion) in self.assertions.iter().enumerate() {
            if assertion.valid {
                continue;
            }
            out.push((depth, self.record(assertion)));
            for child in self.children.iter().filter(|c| c.link == index) {
                child.context.collect_errors(depth + 1, out);
            }
        }
    }
}
