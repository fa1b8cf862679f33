use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Top-level element kinds of an OSM document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Node,
    Way,
    Relation,
}

impl ElementKind {
    /// Returns the element's tag name as it appears in the document.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Node => "node",
            ElementKind::Way => "way",
            ElementKind::Relation => "relation",
        }
    }

    /// Maps a raw XML tag name to an element kind, if it is one.
    pub fn from_tag_name(name: &[u8]) -> Option<Self> {
        match name {
            b"node" => Some(ElementKind::Node),
            b"way" => Some(ElementKind::Way),
            b"relation" => Some(ElementKind::Relation),
            _ => None,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "node" => Ok(ElementKind::Node),
            "way" => Ok(ElementKind::Way),
            "relation" => Ok(ElementKind::Relation),
            _ => Err(format!("Unknown element kind: {}", s)),
        }
    }
}

/// A raw `<tag k= v=>` annotation attached to an element, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTag {
    pub key: String,
    pub value: String,
}

/// One fully-materialized top-level element subtree.
///
/// Produced by the streaming reader one at a time; nothing outside the
/// current element is retained. `node_refs` is populated for ways only and
/// preserves document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub kind: ElementKind,
    pub attributes: BTreeMap<String, String>,
    pub tags: Vec<RawTag>,
    pub node_refs: Vec<String>,
}

impl Element {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            attributes: BTreeMap::new(),
            tags: Vec::new(),
            node_refs: Vec::new(),
        }
    }

    /// Looks up a declared attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}
