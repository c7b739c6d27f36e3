//! Enum validator
//!
//! Applies to every instance type, independent of `type`.

use jsv_document::deep_equal;
use serde_json::Value;

use super::Validator;
use super::context::Context;

pub(super) fn validate(_validator: &Validator, ctx: &mut Context<'_, '_>) -> bool {
    let Some(instance) = ctx.instance() else {
        return true;
    };
    match ctx.property("enum") {
        None => true,
        Some(Value::Array(values)) => {
            let found = values.iter().any(|value| deep_equal(value, instance));
            ctx.assert(found, "is not one of the enumerated values", "enum")
        }
        Some(_) => ctx.assert(false, "specified enum is not a list", "enum"),
    }
}
