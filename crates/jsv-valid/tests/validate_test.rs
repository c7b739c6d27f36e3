//! Behaviour of whole validation runs: determinism, monotonic validity,
//! combinator diagnostics and object keywords.

use jsv_document::{Path, SchemaNode};
use jsv_valid::{Config, Context, Validator};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn validate(schema: &Value, instance: &Value) -> (bool, Vec<String>) {
    let validation = Validator::default()
        .validate_value(schema, instance)
        .expect("schema is an object");
    (validation.is_valid(), validation.error_trace())
}

#[test]
fn test_validation_is_deterministic() {
    let schema = json!({
        "type": "object",
        "properties": {
            "tags": { "type": "array", "items": { "type": "string" }, "uniqueItems": true },
            "size": { "anyOf": [{ "minimum": 10 }, { "multipleOf": 2 }] }
        },
        "required": ["tags", "size", "owner"]
    });
    let instance = json!({ "tags": ["a", 1, "a"], "size": 3 });
    let first = validate(&schema, &instance);
    for _ in 0..5 {
        assert_eq!(validate(&schema, &instance), first);
    }
    assert!(!first.0);
}

#[test]
fn test_any_of_completeness() {
    let (valid, trace) = validate(&json!({ "anyOf": [{ "minimum": 10 }] }), &json!(5));
    assert!(!valid);
    assert!(trace.iter().any(|line| line.contains("minimum invalid")));
}

#[test]
fn test_any_of_suppression() {
    let schema = json!({ "anyOf": [{ "required": ["a"] }, { "required": ["b"] }] });
    let instance = json!({ "b": 1 });
    let validator = Validator::default();
    let validation = validator.validate_value(&schema, &instance).unwrap();
    assert!(validation.is_valid());
    assert!(validation.errors().is_empty());
    // the failed arm is still in the tree, just not surfaced
    let arm = validation.context().subcontexts().next().unwrap();
    assert!(!arm.is_valid());
}

#[test]
fn test_one_of_exclusivity() {
    assert!(!validate(&json!({ "oneOf": [{ "minimum": 0 }, { "maximum": 100 }] }), &json!(50)).0);
    assert!(validate(&json!({ "oneOf": [{ "minimum": 0 }, { "maximum": -10 }] }), &json!(50)).0);
}

#[test]
fn test_unique_items() {
    let schema = json!({ "uniqueItems": true });
    assert!(!validate(&schema, &json!([1, 2, { "a": 1 }, { "a": 1 }])).0);
    assert!(validate(&schema, &json!([1, 2, { "a": 1 }, { "a": 2 }])).0);
}

#[test]
fn test_subcontext_path_round_trip() {
    let schema = json!({
        "properties": { "one": { "items": [{ "type": "string" }] } }
    });
    let instance = json!({ "one": ["first", "second"] });
    let root = Context::new(SchemaNode::new(&schema).unwrap(), &instance);
    let sub = root
        .subcontext("properties/one", "one")
        .subcontext("items/0", "0");
    assert_eq!(sub.instance_path().to_string(), "one/0");
    assert_eq!(sub.instance(), Some(&instance["one"][0]));
    assert_eq!(sub.schema_path().to_string(), "properties/one/items/0");
}

#[test]
fn test_required_vs_absent() {
    let schema = json!({ "properties": { "x": { "type": "string" } } });
    assert!(validate(&schema, &json!({})).0);

    let schema = json!({ "properties": { "x": { "type": "string" } }, "required": ["x"] });
    let instance = json!({});
    let validator = Validator::default();
    let validation = validator.validate_value(&schema, &instance).unwrap();
    let required: Vec<_> = validation
        .context()
        .assertions()
        .iter()
        .filter(|a| a.property.as_deref() == Some("required"))
        .collect();
    assert_eq!(required.len(), 1);
    assert!(!required[0].valid);
    assert_eq!(
        validation.error_trace(),
        vec![r#"required invalid: is missing required properties: x: expected ["x"], was {}"#]
    );
}

#[test]
fn test_monotonic_validity_across_keywords() {
    let schema = json!({ "minProperties": 3, "properties": { "a": {} } });
    let instance = json!({ "a": 1 });
    let validator = Validator::default();
    let validation = validator.validate_value(&schema, &instance).unwrap();
    assert!(!validation.is_valid());
    let last = validation.context().assertions().last().unwrap();
    assert!(last.valid);
}

#[test]
fn test_nested_error_trace() {
    let schema = json!({
        "properties": {
            "user": {
                "properties": { "age": { "type": "integer", "minimum": 0 } }
            }
        }
    });
    let (valid, trace) = validate(&schema, &json!({ "user": { "age": -1 } }));
    assert!(!valid);
    assert_eq!(
        trace,
        vec![
            r#"properties invalid: property user is invalid: expected {"user":{"properties":{"age":{"type":"integer","minimum":0}}}}, was {"user":{"age":-1}}"#,
            r#"  user properties invalid: property age is invalid: expected {"age":{"type":"integer","minimum":0}}, was {"age":-1}"#,
            "    user/age minimum invalid: is less than minimum: expected 0, was -1",
        ]
    );
}

#[test]
fn test_pattern_and_additional_properties() {
    let schema = json!({
        "properties": { "id": { "type": "integer" } },
        "patternProperties": { "^x-": { "type": "string" } },
        "additionalProperties": false
    });
    assert!(validate(&schema, &json!({ "id": 1, "x-note": "hi" })).0);
    let (valid, trace) = validate(&schema, &json!({ "id": 1, "extra": true }));
    assert!(!valid);
    assert_eq!(
        trace,
        vec![r#"additionalProperties invalid: has an unknown property: expected false, was "extra""#]
    );
}

#[test]
fn test_key_matching_several_patterns_checks_each() {
    let schema = json!({
        "patternProperties": {
            "^a": { "type": "string" },
            "b$": { "minLength": 3 }
        }
    });
    let validator = Validator::default();
    let instance = json!({ "ab": "x" });
    let validation = validator.validate_value(&schema, &instance).unwrap();
    assert!(!validation.is_valid());
    assert_eq!(validation.context().subcontexts().count(), 2);
    let errors = validation.errors();
    assert_eq!(errors.last().unwrap().schema_path.to_string(), "patternProperties/b$");
}

#[test]
fn test_additional_properties_schema() {
    let schema = json!({ "additionalProperties": { "type": "number" } });
    assert!(validate(&schema, &json!({ "a": 1, "b": 2.5 })).0);
    assert!(!validate(&schema, &json!({ "a": "1" })).0);
}

#[test]
fn test_dependencies() {
    let schema = json!({
        "dependencies": {
            "card": ["billing", "name"],
            "nick": "name",
            "admin": { "required": ["role"] }
        }
    });
    assert!(validate(&schema, &json!({ "other": 1 })).0);
    assert!(validate(&schema, &json!({ "card": 1, "billing": 2, "name": 3 })).0);
    let deps = schema["dependencies"].to_string();
    assert_eq!(
        validate(&schema, &json!({ "card": 1, "nick": "n" })).1,
        vec![
            format!(
                r#"dependencies invalid: card depends on missing properties: billing, name: expected {deps}, was {{"card":1,"nick":"n"}}"#
            ),
            format!(
                r#"dependencies invalid: nick depends on missing properties: name: expected {deps}, was {{"card":1,"nick":"n"}}"#
            ),
        ]
    );
    let validator = Validator::default();
    let instance = json!({ "admin": true });
    let validation = validator.validate_value(&schema, &instance).unwrap();
    let errors = validation.errors();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[1].schema_path.to_string(), "dependencies/admin");
    assert!(errors[1].instance_path.is_root());
}

#[test]
fn test_keys_with_slashes_round_trip() {
    let schema = json!({ "properties": { "a/b": { "type": "string" } } });
    let instance = json!({ "a/b": 1 });
    let validator = Validator::default();
    let validation = validator.validate_value(&schema, &instance).unwrap();
    let errors = validation.errors();
    let leaf = errors.last().unwrap();
    assert_eq!(leaf.instance_path.to_string(), "a~1b");
    assert_eq!(Path::parse(&leaf.instance_path.to_string()).resolve(&instance), Some(&json!(1)));
}

#[test]
fn test_builtins_can_be_disabled() {
    let validator = Validator::new(Config {
        builtin_types: false,
        builtin_formats: false,
    });
    let schema = json!({ "minimum": 10, "format": "date" });
    let instance = json!(5);
    let validation = validator.validate_value(&schema, &instance).unwrap();
    assert_eq!(
        validation.error_trace(),
        vec![r#"format invalid: unknown format: expected "date", was 5"#]
    );
}

#[test]
fn test_validator_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Validator>();
}

#[test]
fn test_output_serializes() {
    let schema = json!({ "type": "string" });
    let instance = json!(true);
    let validator = Validator::default();
    let output = validator.validate_value(&schema, &instance).unwrap().output();
    assert_eq!(
        serde_json::to_value(&output).unwrap(),
        json!({
            "is_valid": false,
            "errors": [{
                "valid": false,
                "predicate": "does not match type",
                "property": "type",
                "expected": "string",
                "actual": "boolean",
                "schema_path": "",
                "instance_path": ""
            }]
        })
    );
}
