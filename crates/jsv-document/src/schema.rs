use serde_json::{Map, Value};

use crate::path::Path;

// =============================================================================
// NodeKind
// =============================================================================

/// Node-kind tag of a value found inside a schema document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A JSON object, usable as a schema.
    Schema,
    /// A JSON array, e.g. the value of `allOf` or tuple-typed `items`.
    SchemaList,
    /// Anything else (strings, numbers, booleans, null).
    Value,
}

impl NodeKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => NodeKind::Schema,
            Value::Array(_) => NodeKind::SchemaList,
            _ => NodeKind::Value,
        }
    }
}

// =============================================================================
// SchemaNode
// =============================================================================

/// A borrowed view of one schema (sub-)document.
///
/// Only JSON objects are schemas. The node is immutable and cheap to copy;
/// it borrows from the caller-owned document for the whole validation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchemaNode<'s> {
    value: &'s Value,
    keywords: &'s Map<String, Value>,
}

impl<'s> SchemaNode<'s> {
    /// View `value` as a schema, or `None` if it is not a JSON object.
    pub fn new(value: &'s Value) -> Option<Self> {
        match value {
            Value::Object(keywords) => Some(Self { value, keywords }),
            _ => None,
        }
    }

    pub fn as_value(&self) -> &'s Value {
        self.value
    }

    /// The raw value declared for a keyword.
    pub fn property(&self, name: &str) -> Option<&'s Value> {
        self.keywords.get(name)
    }

    /// A keyword whose value is a schema or a list of schemas.
    ///
    /// Keywords holding plain values (`"minimum": 3`) yield `None`; use
    /// [`SchemaNode::property`] for those.
    pub fn get(&self, keyword: &str) -> Option<SchemaRef<'s>> {
        let value = self.keywords.get(keyword)?;
        match NodeKind::of(value) {
            NodeKind::Schema => SchemaNode::new(value).map(SchemaRef::Schema),
            NodeKind::SchemaList => value
                .as_array()
                .map(|items| SchemaRef::List(SchemaList(items))),
            NodeKind::Value => None,
        }
    }

    /// A keyword whose value is a mapping (`properties`, `dependencies`, ...).
    pub fn get_map(&self, keyword: &str) -> Option<&'s Map<String, Value>> {
        self.keywords.get(keyword).and_then(Value::as_object)
    }

    /// Raw value at a path relative to this node.
    pub fn get_path(&self, path: &Path) -> Option<&'s Value> {
        path.resolve(self.value)
    }

    /// Schema at a path relative to this node, if the value there is a schema.
    pub fn subschema(&self, path: &Path) -> Option<SchemaNode<'s>> {
        self.get_path(path).and_then(SchemaNode::new)
    }
}

/// Result of [`SchemaNode::get`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchemaRef<'s> {
    Schema(SchemaNode<'s>),
    List(SchemaList<'s>),
}

/// An ordered list of schemas. Entries that are not objects are kept so
/// that indices line up with the document; [`SchemaList::get`] reports them
/// as `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchemaList<'s>(&'s [Value]);

impl<'s> SchemaList<'s> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<SchemaNode<'s>> {
        self.0.get(index).and_then(SchemaNode::new)
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<SchemaNode<'s>>> + 's {
        let items = self.0;
        items.iter().map(SchemaNode::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_only_objects_are_schemas() {
        assert!(SchemaNode::new(&json!({})).is_some());
        assert!(SchemaNode::new(&json!("string")).is_none());
        assert!(SchemaNode::new(&json!([{}])).is_none());
        assert_eq!(NodeKind::of(&json!([])), NodeKind::SchemaList);
        assert_eq!(NodeKind::of(&json!(true)), NodeKind::Value);
    }

    #[test]
    fn test_get_distinguishes_schema_and_list() {
        let doc = json!({
            "items": { "type": "string" },
            "allOf": [ { "minimum": 1 }, "junk" ],
            "minimum": 3
        });
        let node = SchemaNode::new(&doc).unwrap();

        assert!(matches!(node.get("items"), Some(SchemaRef::Schema(_))));
        assert!(node.get("minimum").is_none());
        assert_eq!(node.property("minimum"), Some(&json!(3)));

        let Some(SchemaRef::List(list)) = node.get("allOf") else {
            panic!("expected schema list");
        };
        assert_eq!(list.len(), 2);
        assert!(list.get(0).is_some());
        assert!(list.get(1).is_none());
    }

    #[test]
    fn test_subschema_by_path() {
        let doc = json!({
            "items": {
                "properties": { "one": { "type": "boolean" } }
            }
        });
        let node = SchemaNode::new(&doc).unwrap();
        let one = node.subschema(&Path::parse("items/properties/one")).unwrap();
        assert_eq!(one.property("type"), Some(&json!("boolean")));
        assert!(node.subschema(&Path::parse("items/properties/two")).is_none());
    }
}
