//! Array validator
//!
//! Keywords: `minItems`, `maxItems`, `uniqueItems`, `items`, `additionalItems`.

use jsv_document::{Path, SchemaRef, deep_equal};
use serde_json::Value;

use super::Validator;
use super::context::Context;

pub(super) fn validate(validator: &Validator, ctx: &mut Context<'_, '_>) -> bool {
    let Some(Value::Array(items)) = ctx.instance() else {
        return true;
    };
    let mut valid = true;
    valid &= validate_length(ctx, items);
    valid &= validate_unique(ctx, items);
    valid &= validate_items(validator, ctx, items);
    valid
}

fn validate_length(ctx: &mut Context<'_, '_>, items: &[Value]) -> bool {
    let len = items.len() as u64;
    let mut valid = true;
    if let Some(min) = ctx.property("minItems").and_then(Value::as_u64) {
        valid &= ctx.assert_actual(
            len >= min,
            "has less than the minimum number of items",
            "minItems",
            Value::from(len),
        );
    }
    if let Some(max) = ctx.property("maxItems").and_then(Value::as_u64) {
        valid &= ctx.assert_actual(
            len <= max,
            "has greater than the maximum number of items",
            "maxItems",
            Value::from(len),
        );
    }
    valid
}

fn validate_unique(ctx: &mut Context<'_, '_>, items: &[Value]) -> bool {
    if ctx.property("uniqueItems") != Some(&Value::Bool(true)) {
        return true;
    }
    let duplicate = items
        .iter()
        .enumerate()
        .any(|(i, a)| items[i + 1..].iter().any(|b| deep_equal(a, b)));
    ctx.assert(!duplicate, "does not contain unique items", "uniqueItems")
}

/// A single `items` schema applies to every element; a list of schemas
/// applies positionally, with `additionalItems` covering the rest.
fn validate_items(validator: &Validator, ctx: &mut Context<'_, '_>, items: &[Value]) -> bool {
    let mut valid = true;
    match ctx.get("items") {
        Some(SchemaRef::Schema(_)) => {
            for index in 0..items.len() {
                let mut sub = ctx.subcontext("items", index);
                validator.validate_context(&mut sub);
                valid &= ctx.assert_subcontext(sub, &format!("item {index} is invalid"), "items");
            }
        }
        Some(SchemaRef::List(schemas)) => {
            let additional = ctx.property("additionalItems");
            for (index, item) in items.iter().enumerate() {
                if index < schemas.len() {
                    let mut sub =
                        ctx.subcontext(Path::key("items").child(index.to_string()), index);
                    validator.validate_context(&mut sub);
                    valid &=
                        ctx.assert_subcontext(sub, &format!("item {index} is invalid"), "items");
                    continue;
                }
                match additional {
                    Some(Value::Bool(allowed)) => {
                        valid &= ctx.assert_actual(
                            *allowed,
                            "contains additional items",
                            "additionalItems",
                            item.clone(),
                        );
                    }
                    Some(Value::Object(_)) => {
                        let mut sub = ctx.subcontext("additionalItems", index);
                        validator.validate_context(&mut sub);
                        valid &= ctx.assert_subcontext(
                            sub,
                            &format!("additional item {index} is invalid"),
                            "additionalItems",
                        );
                    }
                    _ => {}
                }
            }
        }
        None => {}
    }
    valid
}
