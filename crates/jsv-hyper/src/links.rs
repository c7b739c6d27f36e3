use jsv_document::SchemaNode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// A hyper-schema link description object.
///
/// `href` is kept as written; URI templates are not expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
    /// Any other members (`method`, `title`, `schema`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Link {
    /// A member of the link object by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }
}

/// Links gathered from a valid-schema set, in set order. Links sharing a
/// relation are all kept; [`LinkTable::rel`] answers with the first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LinkTable {
    links: Vec<Link>,
}

impl LinkTable {
    pub(crate) fn collect(valid_schemas: &[SchemaNode<'_>]) -> Self {
        let links = valid_schemas
            .iter()
            .filter_map(|node| node.property("links").and_then(Value::as_array))
            .flatten()
            .filter_map(|raw| match serde_json::from_value::<Link>(raw.clone()) {
                Ok(link) => Some(link),
                Err(e) => {
                    warn!("skipping malformed link {}: {}", raw, e);
                    None
                }
            })
            .collect();
        Self { links }
    }

    /// First link with relation `rel`.
    pub fn rel(&self, rel: &str) -> Option<&Link> {
        self.links.iter().find(|link| link.rel == rel)
    }

    /// Every link with relation `rel`.
    pub fn rels<'a>(&'a self, rel: &'a str) -> impl Iterator<Item = &'a Link> + 'a {
        self.links.iter().filter(move |link| link.rel == rel)
    }

    pub fn get(&self, index: usize) -> Option<&Link> {
        self.links.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Link> {
        self.links.iter()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl<'a> IntoIterator for &'a LinkTable {
    type Item = &'a Link;
    type IntoIter = std::slice::Iter<'a, Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}
