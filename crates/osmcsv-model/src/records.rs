//! Shaped output records.
//!
//! One element shapes into either a node record or a way record, each with
//! its dependent tag rows (and, for ways, node-membership rows). Cell values
//! stay as the raw attribute text so output round-trips the document
//! losslessly; the schema validator checks coercibility instead.

use serde::{Deserialize, Serialize};

use crate::element::ElementKind;

/// One row of `nodes.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRow {
    pub id: String,
    pub lat: String,
    pub lon: String,
    pub user: String,
    pub uid: String,
    pub version: String,
    pub changeset: String,
    pub timestamp: String,
}

/// One row of `ways.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WayRow {
    pub id: String,
    pub user: String,
    pub uid: String,
    pub version: String,
    pub changeset: String,
    pub timestamp: String,
}

/// One row of `nodes_tags.csv` / `ways_tags.csv`.
///
/// `kind` is the namespace prefix of a colon-separated key, or the default
/// marker for plain keys; it serializes under the column name `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRow {
    pub id: String,
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// One row of `ways_nodes.csv`: the way, a referenced node, and the node's
/// zero-based position within the way's geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WayNodeRow {
    pub id: String,
    pub node_id: String,
    pub position: usize,
}

/// A shaped element, ready for validation and output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapedElement {
    Node {
        row: NodeRow,
        tags: Vec<TagRow>,
    },
    Way {
        row: WayRow,
        nodes: Vec<WayNodeRow>,
        tags: Vec<TagRow>,
    },
}

impl ShapedElement {
    /// The owning element's identifier.
    pub fn id(&self) -> &str {
        match self {
            ShapedElement::Node { row, .. } => &row.id,
            ShapedElement::Way { row, .. } => &row.id,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            ShapedElement::Node { .. } => ElementKind::Node,
            ShapedElement::Way { .. } => ElementKind::Way,
        }
    }

    /// Number of tag rows carried by this element.
    pub fn tag_count(&self) -> usize {
        match self {
            ShapedElement::Node { tags, .. } => tags.len(),
            ShapedElement::Way { tags, .. } => tags.len(),
        }
    }
}
