//! Numeric validator
//!
//! Keywords: `multipleOf`, `minimum`, `maximum`, `exclusiveMinimum`,
//! `exclusiveMaximum`. The exclusive keywords are accepted both as boolean
//! modifiers of `minimum`/`maximum` and as bounds of their own.

use serde_json::Value;

use super::Validator;
use super::context::Context;

pub(super) fn validate(_validator: &Validator, ctx: &mut Context<'_, '_>) -> bool {
    let Some(number) = ctx.instance().and_then(Value::as_f64) else {
        return true;
    };
    let mut valid = true;

    if let Some(divisor) = ctx.property("multipleOf").and_then(Value::as_f64)
        && divisor != 0.0
    {
        valid &= ctx.assert(
            (number / divisor).fract() == 0.0,
            "is not a multiple of",
            "multipleOf",
        );
    }

    if let Some(min) = ctx.property("minimum").and_then(Value::as_f64) {
        valid &= if is_flag_set(ctx, "exclusiveMinimum") {
            ctx.assert(number > min, "is not greater than exclusive minimum", "minimum")
        } else {
            ctx.assert(number >= min, "is less than minimum", "minimum")
        };
    }
    if let Some(max) = ctx.property("maximum").and_then(Value::as_f64) {
        valid &= if is_flag_set(ctx, "exclusiveMaximum") {
            ctx.assert(number < max, "is not less than exclusive maximum", "maximum")
        } else {
            ctx.assert(number <= max, "is greater than maximum", "maximum")
        };
    }

    if let Some(min) = ctx.property("exclusiveMinimum").and_then(Value::as_f64) {
        valid &= ctx.assert(
            number > min,
            "is not greater than exclusive minimum",
            "exclusiveMinimum",
        );
    }
    if let Some(max) = ctx.property("exclusiveMaximum").and_then(Value::as_f64) {
        valid &= ctx.assert(
            number < max,
            "is not less than exclusive maximum",
            "exclusiveMaximum",
        );
    }
    valid
}

fn is_flag_set(ctx: &Context<'_, '_>, keyword: &str) -> bool {
    ctx.property(keyword) == Some(&Value::Bool(true))
}
