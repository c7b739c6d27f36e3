//! Object validator
//!
//! Keywords: `minProperties`, `maxProperties`, `required`, `properties`,
//! `patternProperties`, `additionalProperties`, `dependencies`.

use jsv_document::Path;
use regex::Regex;
use serde_json::{Map, Value};

use super::Validator;
use super::context::Context;

pub(super) fn validate(validator: &Validator, ctx: &mut Context<'_, '_>) -> bool {
    let Some(Value::Object(object)) = ctx.instance() else {
        return true;
    };
    let mut valid = true;
    valid &= validate_size(ctx, object);
    valid &= validate_required(ctx, object);
    valid &= validate_properties(validator, ctx, object);
    valid &= validate_dependencies(validator, ctx, object);
    valid
}

fn validate_size(ctx: &mut Context<'_, '_>, object: &Map<String, Value>) -> bool {
    let count = object.len() as u64;
    let mut valid = true;
    if let Some(min) = ctx.property("minProperties").and_then(Value::as_u64) {
        valid &= ctx.assert_actual(
            count >= min,
            "has too few properties",
            "minProperties",
            Value::from(count),
        );
    }
    if let Some(max) = ctx.property("maxProperties").and_then(Value::as_u64) {
        valid &= ctx.assert_actual(
            count <= max,
            "has too many properties",
            "maxProperties",
            Value::from(count),
        );
    }
    valid
}

/// Direct key lookup: a default declared further down never satisfies
/// `required`.
fn validate_required(ctx: &mut Context<'_, '_>, object: &Map<String, Value>) -> bool {
    let Some(Value::Array(required)) = ctx.property("required") else {
        return true;
    };
    let missing: Vec<&str> = required
        .iter()
        .filter_map(Value::as_str)
        .filter(|name| !object.contains_key(*name))
        .collect();
    ctx.assert(
        missing.is_empty(),
        &format!("is missing required properties: {}", missing.join(", ")),
        "required",
    )
}

fn validate_properties(
    validator: &Validator,
    ctx: &mut Context<'_, '_>,
    object: &Map<String, Value>,
) -> bool {
    let properties = ctx.get_map("properties");
    let patterns = compile_patterns(validator, ctx);
    let additional = ctx.property("additionalProperties");
    if properties.is_none() && patterns.is_empty() && additional.is_none() {
        return true;
    }

    let mut valid = true;
    for key in object.keys() {
        let mut matched = false;

        if properties.is_some_and(|p| p.contains_key(key)) {
            matched = true;
            let mut sub = ctx.subcontext(
                Path::key("properties").child(key.as_str()),
                Path::key(key.as_str()),
            );
            validator.validate_context(&mut sub);
            valid &=
                ctx.assert_subcontext(sub, &format!("property {key} is invalid"), "properties");
        }

        for (pattern, regex) in &patterns {
            if !regex.is_match(key) {
                continue;
            }
            matched = true;
            let mut sub = ctx.subcontext(
                Path::key("patternProperties").child(*pattern),
                Path::key(key.as_str()),
            );
            validator.validate_context(&mut sub);
            valid &= ctx.assert_subcontext(
                sub,
                &format!("property {key} is invalid"),
                "patternProperties",
            );
        }

        if matched {
            continue;
        }
        match additional {
            Some(Value::Bool(allowed)) => {
                valid &= ctx.assert_actual(
                    *allowed,
                    "has an unknown property",
                    "additionalProperties",
                    Value::String(key.clone()),
                );
            }
            Some(Value::Object(_)) => {
                let mut sub = ctx.subcontext("additionalProperties", Path::key(key.as_str()));
                validator.validate_context(&mut sub);
                valid &= ctx.assert_subcontext(
                    sub,
                    &format!("additional property {key} is invalid"),
                    "additionalProperties",
                );
            }
            _ => {}
        }
    }
    valid
}

/// Compiled `patternProperties` keys. Keys that do not compile are
/// recorded as failures and skipped.
fn compile_patterns<'s>(
    validator: &Validator,
    ctx: &mut Context<'s, '_>,
) -> Vec<(&'s str, Regex)> {
    let Some(patterns) = ctx.get_map("patternProperties") else {
        return Vec::new();
    };
    let mut compiled = Vec::with_capacity(patterns.len());
    for pattern in patterns.keys() {
        match validator.patterns().get(pattern) {
            Some(regex) => compiled.push((pattern.as_str(), regex)),
            None => {
                ctx.assert_actual(
                    false,
                    "has an invalid pattern",
                    "patternProperties",
                    Value::String(pattern.clone()),
                );
            }
        }
    }
    compiled
}

fn validate_dependencies(
    validator: &Validator,
    ctx: &mut Context<'_, '_>,
    object: &Map<String, Value>,
) -> bool {
    let Some(dependencies) = ctx.get_map("dependencies") else {
        return true;
    };
    let mut valid = true;
    for (key, dependency) in dependencies {
        if !object.contains_key(key) {
            continue;
        }
        let names: Vec<&str> = match dependency {
            Value::String(name) => vec![name.as_str()],
            Value::Array(names) => names.iter().filter_map(Value::as_str).collect(),
            Value::Object(_) => {
                let mut sub = ctx.subcontext(
                    Path::key("dependencies").child(key.as_str()),
                    Path::root(),
                );
                validator.validate_context(&mut sub);
                valid &= ctx.assert_subcontext(
                    sub,
                    &format!("does not satisfy dependency of {key}"),
                    "dependencies",
                );
                continue;
            }
            _ => continue,
        };
        let missing: Vec<&str> = names
            .into_iter()
            .filter(|name| !object.contains_key(*name))
            .collect();
        valid &= ctx.assert(
            missing.is_empty(),
            &format!("{key} depends on missing properties: {}", missing.join(", ")),
            "dependencies",
        );
    }
    valid
}
