//! Declared structure of the five output streams.
//!
//! Field order here is the column order of the CSV files and of the SQL
//! tables they load into; the output sink derives its header rows from
//! these declarations and the validator checks shaped records against them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coercion expected of a cell value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Integer,
    Float,
    Text,
}

/// One declared column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind }
}

/// The declared layout of one output stream.
#[derive(Debug, Clone, Copy)]
pub struct RecordSchema {
    /// Stream name, used to qualify violated fields in reports.
    pub record: &'static str,
    pub fields: &'static [FieldSpec],
}

pub const NODE_SCHEMA: RecordSchema = RecordSchema {
    record: "nodes",
    fields: &[
        field("id", FieldKind::Integer),
        field("lat", FieldKind::Float),
        field("lon", FieldKind::Float),
        field("user", FieldKind::Text),
        field("uid", FieldKind::Integer),
        field("version", FieldKind::Text),
        field("changeset", FieldKind::Integer),
        field("timestamp", FieldKind::Text),
    ],
};

pub const NODE_TAG_SCHEMA: RecordSchema = RecordSchema {
    record: "nodes_tags",
    fields: &[
        field("id", FieldKind::Integer),
        field("key", FieldKind::Text),
        field("value", FieldKind::Text),
        field("type", FieldKind::Text),
    ],
};

pub const WAY_SCHEMA: RecordSchema = RecordSchema {
    record: "ways",
    fields: &[
        field("id", FieldKind::Integer),
        field("user", FieldKind::Text),
        field("uid", FieldKind::Integer),
        field("version", FieldKind::Text),
        field("changeset", FieldKind::Integer),
        field("timestamp", FieldKind::Text),
    ],
};

pub const WAY_NODE_SCHEMA: RecordSchema = RecordSchema {
    record: "ways_nodes",
    fields: &[
        field("id", FieldKind::Integer),
        field("node_id", FieldKind::Integer),
        field("position", FieldKind::Integer),
    ],
};

pub const WAY_TAG_SCHEMA: RecordSchema = RecordSchema {
    record: "ways_tags",
    fields: &[
        field("id", FieldKind::Integer),
        field("key", FieldKind::Text),
        field("value", FieldKind::Text),
        field("type", FieldKind::Text),
    ],
};

/// One violated field with every reason it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Qualified field name, e.g. `nodes.lat` or `ways_tags[2].id`.
    pub field: String,
    pub reasons: Vec<String>,
}

/// Aggregated schema violations for one shaped element.
///
/// All violated fields are collected before the report surfaces, never just
/// the first mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaReport {
    pub element_kind: String,
    pub element_id: String,
    pub violations: Vec<FieldViolation>,
}

impl SchemaReport {
    pub fn new(element_kind: &str, element_id: &str) -> Self {
        Self {
            element_kind: element_kind.to_string(),
            element_id: element_id.to_string(),
            violations: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn push(&mut self, field: String, reasons: Vec<String>) {
        self.violations.push(FieldViolation { field, reasons });
    }
}

impl fmt::Display for SchemaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} failed schema validation",
            self.element_kind, self.element_id
        )?;
        for violation in &self.violations {
            write!(f, "\n  {}: {}", violation.field, violation.reasons.join(", "))?;
        }
        Ok(())
    }
}
