//! Combinator validator
//!
//! `allOf`, `anyOf` and `oneOf` evaluate every branch, even once the outcome
//! is decided, so the diagnostics of each branch are available. Each group
//! is recorded as a single assertion that adopts all of its branches.

use jsv_document::{Path, SchemaNode, SchemaRef};
use tracing::trace;

use super::Validator;
use super::context::Context;

/// A branch after validation, with the valid-schema set it produced.
struct Branch<'s, 'i> {
    context: Context<'s, 'i>,
    valid_schemas: Vec<SchemaNode<'s>>,
}

impl Branch<'_, '_> {
    fn is_valid(&self) -> bool {
        self.context.is_valid()
    }
}

/// Validate the combinator keywords of `ctx`. Returns the schemas the
/// matching branches contribute to the valid-schema set, in declaration
/// order.
pub(super) fn validate<'s>(validator: &Validator, ctx: &mut Context<'s, '_>) -> Vec<SchemaNode<'s>> {
    let mut schemas = Vec::new();

    if let Some(branches) = evaluate(validator, ctx, "allOf") {
        let valid = branches.iter().all(Branch::is_valid);
        if valid {
            schemas.extend(branches.iter().flat_map(|b| b.valid_schemas.iter().copied()));
        }
        adopt(ctx, valid, branches, "does not match all schemas", "allOf");
    }

    if let Some(branches) = evaluate(validator, ctx, "anyOf") {
        let valid = branches.iter().any(Branch::is_valid);
        schemas.extend(
            branches
                .iter()
                .filter(|b| b.is_valid())
                .flat_map(|b| b.valid_schemas.iter().copied()),
        );
        adopt(ctx, valid, branches, "does not match any schema", "anyOf");
    }

    if let Some(branches) = evaluate(validator, ctx, "oneOf") {
        let matched = branches.iter().filter(|b| b.is_valid()).count();
        if let Some(first) = branches.iter().find(|b| b.is_valid()) {
            schemas.extend(first.valid_schemas.iter().copied());
        }
        adopt(ctx, matched == 1, branches, "does not match exactly one schema", "oneOf");
    }

    if let Some(SchemaRef::Schema(_)) = ctx.get("not") {
        let mut branch = ctx.subcontext("not", Path::root());
        let matched = validator.validate_context(&mut branch);
        trace!("not at '{}': branch matched = {}", ctx.schema_path(), matched);
        ctx.assert_children(!matched, [branch], "matches disallowed schema", "not");
    }

    schemas
}

/// Validate every branch of a schema-list keyword, each in its own
/// `<keyword>/<index>` subcontext on the same instance.
fn evaluate<'s, 'i>(
    validator: &Validator,
    ctx: &Context<'s, 'i>,
    keyword: &str,
) -> Option<Vec<Branch<'s, 'i>>> {
    let Some(SchemaRef::List(list)) = ctx.get(keyword) else {
        return None;
    };
    let branches: Vec<_> = (0..list.len())
        .map(|index| {
            let mut context = ctx.subcontext(Path::key(keyword).child(index.to_string()), Path::root());
            let mut valid_schemas = Vec::new();
            validator.validate_with(&mut context, &mut valid_schemas);
            Branch {
                context,
                valid_schemas,
            }
        })
        .collect();
    trace!(
        "{} at '{}': {} of {} branches matched",
        keyword,
        ctx.schema_path(),
        branches.iter().filter(|b| b.is_valid()).count(),
        branches.len()
    );
    Some(branches)
}

fn adopt<'s, 'i>(
    ctx: &mut Context<'s, 'i>,
    valid: bool,
    branches: Vec<Branch<'s, 'i>>,
    predicate: &str,
    keyword: &str,
) {
    ctx.assert_children(
        valid,
        branches.into_iter().map(|b| b.context),
        predicate,
        keyword,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn run(schema: &Value, instance: &Value) -> (bool, Vec<String>) {
        let validation = Validator::default().validate_value(schema, instance).unwrap();
        (validation.is_valid(), validation.error_trace())
    }

    #[test]
    fn test_any_of_single_failing_branch_is_reported() {
        let (valid, trace) = run(&json!({ "anyOf": [{ "minimum": 10 }] }), &json!(5));
        assert!(!valid);
        assert_eq!(
            trace,
            vec![
                r#"anyOf invalid: does not match any schema: expected [{"minimum":10}], was 5"#
                    .to_string(),
                "  minimum invalid: is less than minimum: expected 10, was 5".to_string(),
            ]
        );
    }

    #[test]
    fn test_any_of_suppresses_failed_arm() {
        let schema = json!({ "anyOf": [{ "required": ["a"] }, { "required": ["b"] }] });
        let (valid, trace) = run(&schema, &json!({ "b": 1 }));
        assert!(valid);
        assert!(trace.is_empty());
    }

    #[test]
    fn test_any_of_arm_stays_suppressed_when_parent_fails_elsewhere() {
        let schema = json!({
            "anyOf": [{ "required": ["a"] }, { "required": ["b"] }],
            "maxProperties": 0
        });
        let instance = json!({ "b": 1 });
        let validation = Validator::default()
            .validate_value(&schema, &instance)
            .unwrap();
        let errors = validation.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].property.as_deref(), Some("maxProperties"));
    }

    #[test]
    fn test_one_of_exclusivity() {
        assert!(!run(&json!({ "oneOf": [{ "minimum": 0 }, { "maximum": 100 }] }), &json!(50)).0);
        assert!(run(&json!({ "oneOf": [{ "minimum": 0 }, { "maximum": -10 }] }), &json!(50)).0);
        assert!(!run(&json!({ "oneOf": [{ "minimum": 100 }, { "maximum": -10 }] }), &json!(50)).0);
    }

    #[test]
    fn test_one_of_collects_first_match_only() {
        let schema = json!({ "oneOf": [{ "maximum": -10 }, { "minimum": 0 }] });
        let instance = json!(50);
        let validator = Validator::default();
        let validation = validator.validate_value(&schema, &instance).unwrap();
        let schemas: Vec<_> = validation.valid_schemas().iter().map(|s| s.as_value()).collect();
        assert_eq!(schemas, vec![&schema, &schema["oneOf"][1]]);
    }

    #[test]
    fn test_all_of_evaluates_every_branch() {
        let schema = json!({ "allOf": [{ "minimum": 10 }, { "maximum": 0 }] });
        let instance = json!(5);
        let validation = Validator::default().validate_value(&schema, &instance).unwrap();
        let predicates: Vec<_> = validation
            .errors()
            .into_iter()
            .filter_map(|e| e.predicate)
            .collect();
        assert_eq!(
            predicates,
            vec![
                "does not match all schemas".to_string(),
                "is less than minimum".to_string(),
                "is greater than maximum".to_string(),
            ]
        );
        assert_eq!(validation.context().subcontexts().count(), 2);
    }

    #[test]
    fn test_all_of_branch_paths() {
        let schema = json!({ "allOf": [{}, { "type": "string" }] });
        let instance = json!(1);
        let validation = Validator::default().validate_value(&schema, &instance).unwrap();
        let errors = validation.errors();
        assert_eq!(errors[1].schema_path.to_string(), "allOf/1");
        assert!(errors[1].instance_path.is_root());
    }

    #[test]
    fn test_not() {
        let schema = json!({ "not": { "type": "string" } });
        assert!(run(&schema, &json!(1)).0);
        let (valid, trace) = run(&schema, &json!("a"));
        assert!(!valid);
        assert_eq!(
            trace,
            vec![r#"not invalid: matches disallowed schema: expected {"type":"string"}, was "a""#.to_string()]
        );
    }

    #[test]
    fn test_not_contributes_no_schemas() {
        let schema = json!({ "not": { "type": "string" } });
        let instance = json!(1);
        let validator = Validator::default();
        let validation = validator.validate_value(&schema, &instance).unwrap();
        assert_eq!(validation.valid_schemas().len(), 1);
    }

    #[test]
    fn test_malformed_combinators_are_ignored() {
        assert!(run(&json!({ "anyOf": { "minimum": 10 }, "not": [] }), &json!(5)).0);
    }
}
