use jsv_document::SchemaNode;
use serde_json::Value;

/// The schema whose default applies: the first in `valid_schemas` that
/// declares `type` or `default`, or `fallback` if none does.
pub(crate) fn defaults_source<'s>(
    valid_schemas: &[SchemaNode<'s>],
    fallback: SchemaNode<'s>,
) -> SchemaNode<'s> {
    valid_schemas
        .iter()
        .find(|node| node.property("type").is_some() || node.property("default").is_some())
        .copied()
        .unwrap_or(fallback)
}

/// Merge `default` under `instance`.
///
/// Keys present in the instance win; mappings present in both are merged
/// recursively. An instance that is not a mapping is returned unchanged.
pub fn merge_defaults(instance: &Value, default: &Value) -> Value {
    let (Value::Object(values), Value::Object(defaults)) = (instance, default) else {
        return instance.clone();
    };
    let mut merged = values.clone();
    for (key, default) in defaults {
        match merged.get_mut(key) {
            Some(value) => {
                if value.is_object() && default.is_object() {
                    *value = merge_defaults(value, default);
                }
            }
            None => {
                merged.insert(key.clone(), default.clone());
            }
        }
    }
    Value::Object(merged)
}
