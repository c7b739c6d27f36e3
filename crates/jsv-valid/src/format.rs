//! Built-in formats
//!
//! `date`, `time` and `regex` only constrain strings; other instance types
//! pass. `utc-millisec` accepts numbers and strings of digits.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::registry::Registry;
use crate::validate::Context;

static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("invalid date regex")
});

static TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01]\d|2[0-3]):[0-5]\d:[0-5]\d$").expect("invalid time regex")
});

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("invalid digits regex"));

pub(crate) fn register_builtin(registry: &mut Registry) {
    registry
        .add_format("date", |ctx: &Context<'_, '_>| string_matches(ctx, &DATE))
        .add_format("time", |ctx: &Context<'_, '_>| string_matches(ctx, &TIME))
        .add_format("utc-millisec", utc_millisec)
        .add_format("regex", compiles_as_regex);
}

fn string_matches(ctx: &Context<'_, '_>, regex: &Regex) -> bool {
    match ctx.instance() {
        Some(Value::String(text)) => regex.is_match(text),
        _ => true,
    }
}

fn utc_millisec(ctx: &Context<'_, '_>) -> bool {
    match ctx.instance() {
        Some(Value::Number(_)) => true,
        Some(Value::String(text)) => DIGITS.is_match(text),
        _ => false,
    }
}

fn compiles_as_regex(ctx: &Context<'_, '_>) -> bool {
    match ctx.instance() {
        Some(Value::String(text)) => Regex::new(text).is_ok(),
        _ => true,
    }
}
