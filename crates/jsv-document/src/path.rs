use core::fmt::Display;

use serde::{Serialize, Serializer};
use serde_json::Value;
use thisisplural::Plural;

/// Separator between path segments.
pub const SEPARATOR: char = '/';

/// Leading segment that marks the document root (`#/properties/a`).
pub const ROOT_MARKER: &str = "#";

/// A path into a schema or an instance.
///
/// Segments are stored unescaped. The textual form joins them with `/` and
/// escapes `~` as `~0` and `/` as `~1`, so object keys containing a slash
/// (for instance a regular expression under `patternProperties`) survive a
/// round trip through [`Path::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Plural)]
pub struct Path(pub Vec<String>);

impl Path {
    /// Create an empty path representing the root.
    pub fn root() -> Self {
        Path(Vec::new())
    }

    /// Check if this is the root path
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a `/`-delimited path.
    ///
    /// Empty segments and a leading `#` are skipped, so `""`, `"#"` and `"/"`
    /// all denote the root.
    pub fn parse(text: &str) -> Self {
        let mut segments = text.split(SEPARATOR).filter(|s| !s.is_empty()).peekable();
        if segments.peek() == Some(&ROOT_MARKER) {
            segments.next();
        }
        Path(segments.map(unescape).collect())
    }

    /// A single raw segment, never split on `/`.
    pub fn key(segment: impl Into<String>) -> Self {
        Path(vec![segment.into()])
    }

    /// A single array index segment.
    pub fn index(index: usize) -> Self {
        Path(vec![index.to_string()])
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Append one raw segment.
    pub fn push_segment(&mut self, segment: impl Into<String>) {
        self.0.push(segment.into());
    }

    /// Builder form of [`Path::push_segment`].
    pub fn child(mut self, segment: impl Into<String>) -> Self {
        self.push_segment(segment);
        self
    }

    /// This path followed by every segment of `relative`.
    pub fn join(&self, relative: &Path) -> Path {
        Path(self.0.iter().chain(&relative.0).cloned().collect())
    }

    /// Walk `root` one segment at a time.
    ///
    /// Returns `None` as soon as a segment does not resolve: a missing key,
    /// an index out of range or not a number, or descent into a scalar.
    pub fn resolve<'v>(&self, root: &'v Value) -> Option<&'v Value> {
        self.0
            .iter()
            .try_fold(root, |node, segment| step(node, segment))
    }
}

/// Resolve a single segment below `node`.
pub fn step<'v>(node: &'v Value, segment: &str) -> Option<&'v Value> {
    match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn escape(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

fn unescape(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

impl Display for Path {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{SEPARATOR}")?;
            }
            write!(f, "{}", escape(segment))?;
        }
        Ok(())
    }
}

impl From<&str> for Path {
    fn from(text: &str) -> Self {
        Path::parse(text)
    }
}

impl From<String> for Path {
    fn from(text: String) -> Self {
        Path::parse(&text)
    }
}

impl From<usize> for Path {
    fn from(index: usize) -> Self {
        Path::index(index)
    }
}

impl From<&Path> for Path {
    fn from(path: &Path) -> Self {
        path.clone()
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
