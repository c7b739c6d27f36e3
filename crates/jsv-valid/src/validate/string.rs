//! String validator
//!
//! Keywords: `minLength`, `maxLength`, `pattern`. Lengths count characters,
//! not bytes.

use serde_json::Value;

use super::Validator;
use super::context::Context;

pub(super) fn validate(validator: &Validator, ctx: &mut Context<'_, '_>) -> bool {
    let Some(Value::String(text)) = ctx.instance() else {
        return true;
    };
    let mut valid = true;

    let len = text.chars().count() as u64;
    if let Some(min) = ctx.property("minLength").and_then(Value::as_u64) {
        valid &= ctx.assert_actual(
            len >= min,
            "is less than the minimum length",
            "minLength",
            Value::from(len),
        );
    }
    if let Some(max) = ctx.property("maxLength").and_then(Value::as_u64) {
        valid &= ctx.assert_actual(
            len <= max,
            "is greater than the maximum length",
            "maxLength",
            Value::from(len),
        );
    }

    if let Some(pattern) = ctx.property("pattern").and_then(Value::as_str) {
        valid &= match validator.patterns().is_match(pattern, text) {
            Some(matched) => ctx.assert(matched, "does not match pattern", "pattern"),
            None => ctx.assert(false, "has an invalid pattern", "pattern"),
        };
    }
    valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn errors(schema: &Value, instance: &Value) -> Vec<String> {
        Validator::default()
            .validate_value(schema, instance)
            .unwrap()
            .error_trace()
    }

    #[test]
    fn test_length_counts_chars() {
        let schema = json!({ "minLength": 2, "maxLength": 3 });
        assert!(errors(&schema, &json!("日本")).is_empty());
        assert_eq!(
            errors(&schema, &json!("a")),
            vec!["minLength invalid: is less than the minimum length: expected 2, was 1"]
        );
        assert_eq!(
            errors(&schema, &json!("abcd")),
            vec!["maxLength invalid: is greater than the maximum length: expected 3, was 4"]
        );
    }

    #[test]
    fn test_pattern_is_a_search() {
        let schema = json!({ "pattern": "b+" });
        assert!(errors(&schema, &json!("abbc")).is_empty());
        assert_eq!(
            errors(&json!({ "pattern": "^b+$" }), &json!("abbc")),
            vec![r#"pattern invalid: does not match pattern: expected "^b+$", was "abbc""#]
        );
    }

    #[test]
    fn test_invalid_pattern_is_a_failure() {
        assert_eq!(
            errors(&json!({ "pattern": "(" }), &json!("x")),
            vec![r#"pattern invalid: has an invalid pattern: expected "(", was "x""#]
        );
    }

    #[test]
    fn test_zero_min_length_is_a_bound() {
        assert!(errors(&json!({ "minLength": 0 }), &json!("")).is_empty());
        assert_eq!(errors(&json!({ "maxLength": 0 }), &json!("a")).len(), 1);
    }
}
