use std::borrow::Cow;

use jsv_document::SchemaNode;
use jsv_valid::Validator;
use serde_json::{Map, Value, json};

/// Schema governing property `key`, gathered from `valid_schemas`.
///
/// Every `properties/<key>` entry and every `patternProperties` entry whose
/// pattern matches `key` counts, in set order. Entries that are not schemas
/// constrain nothing and are left out.
pub(crate) fn collate<'s>(
    validator: &Validator,
    valid_schemas: &[SchemaNode<'s>],
    key: &str,
) -> Cow<'s, Value> {
    let mut matches: Vec<&'s Value> = Vec::new();
    for node in valid_schemas {
        if let Some(schema) = node.get_map("properties").and_then(|p| p.get(key)) {
            matches.push(schema);
        }
        if let Some(patterns) = node.get_map("patternProperties") {
            matches.extend(
                patterns
                    .iter()
                    .filter(|(pattern, _)| validator.patterns().is_match(pattern, key) == Some(true))
                    .map(|(_, schema)| schema),
            );
        }
    }
    matches.retain(|schema| schema.is_object());

    match matches.as_slice() {
        [] => Cow::Owned(Value::Object(Map::new())),
        [schema] => Cow::Borrowed(*schema),
        _ => Cow::Owned(json!({ "allOf": matches })),
    }
}
