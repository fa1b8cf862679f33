//! CSV record sink.
//!
//! [`CsvSink`] owns one writer per output stream, writes each header row at
//! creation, and appends shaped records in the fixed column order declared
//! by the stream schemas. Everything is UTF-8; multi-byte values round-trip
//! losslessly. Rows written before a failure stay valid, there is no
//! rollback.

use std::fs;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;

use osmcsv_model::{
    NODE_SCHEMA, NODE_TAG_SCHEMA, NodeRow, RecordSchema, ShapedElement, TagRow, WAY_NODE_SCHEMA,
    WAY_SCHEMA, WAY_TAG_SCHEMA, WayNodeRow, WayRow,
};

pub const NODES_FILE: &str = "nodes.csv";
pub const NODE_TAGS_FILE: &str = "nodes_tags.csv";
pub const WAYS_FILE: &str = "ways.csv";
pub const WAY_NODES_FILE: &str = "ways_nodes.csv";
pub const WAY_TAGS_FILE: &str = "ways_tags.csv";

/// The five correlated output streams.
pub struct CsvSink {
    nodes: Writer<File>,
    node_tags: Writer<File>,
    ways: Writer<File>,
    way_nodes: Writer<File>,
    way_tags: Writer<File>,
}

impl CsvSink {
    /// Creates the output directory and the five files, each with its
    /// header row already written.
    pub fn create(output_dir: &Path) -> Result<Self> {
        fs::create_dir_all(output_dir)
            .with_context(|| format!("create output directory {}", output_dir.display()))?;
        Ok(Self {
            nodes: open_stream(output_dir, NODES_FILE, &NODE_SCHEMA)?,
            node_tags: open_stream(output_dir, NODE_TAGS_FILE, &NODE_TAG_SCHEMA)?,
            ways: open_stream(output_dir, WAYS_FILE, &WAY_SCHEMA)?,
            way_nodes: open_stream(output_dir, WAY_NODES_FILE, &WAY_NODE_SCHEMA)?,
            way_tags: open_stream(output_dir, WAY_TAGS_FILE, &WAY_TAG_SCHEMA)?,
        })
    }

    /// Appends one shaped element to its streams.
    pub fn write(&mut self, element: &ShapedElement) -> Result<()> {
        match element {
            ShapedElement::Node { row, tags } => {
                write_node(&mut self.nodes, row)?;
                for tag in tags {
                    write_tag(&mut self.node_tags, tag)?;
                }
            }
            ShapedElement::Way { row, nodes, tags } => {
                write_way(&mut self.ways, row)?;
                for node in nodes {
                    write_way_node(&mut self.way_nodes, node)?;
                }
                for tag in tags {
                    write_tag(&mut self.way_tags, tag)?;
                }
            }
        }
        Ok(())
    }

    /// Flushes all five streams. Must be called on every exit path that
    /// intends the output to be readable.
    pub fn finish(mut self) -> Result<()> {
        self.nodes.flush().context("flush nodes")?;
        self.node_tags.flush().context("flush node tags")?;
        self.ways.flush().context("flush ways")?;
        self.way_nodes.flush().context("flush way nodes")?;
        self.way_tags.flush().context("flush way tags")?;
        Ok(())
    }
}

fn open_stream(dir: &Path, name: &str, schema: &RecordSchema) -> Result<Writer<File>> {
    let path = dir.join(name);
    let mut writer =
        Writer::from_path(&path).with_context(|| format!("create {}", path.display()))?;
    writer
        .write_record(schema.fields.iter().map(|field| field.name))
        .with_context(|| format!("write header of {}", path.display()))?;
    Ok(writer)
}

fn write_node(writer: &mut Writer<File>, row: &NodeRow) -> Result<()> {
    writer
        .write_record([
            &row.id,
            &row.lat,
            &row.lon,
            &row.user,
            &row.uid,
            &row.version,
            &row.changeset,
            &row.timestamp,
        ])
        .context("write node row")
}

fn write_way(writer: &mut Writer<File>, row: &WayRow) -> Result<()> {
    writer
        .write_record([
            &row.id,
            &row.user,
            &row.uid,
            &row.version,
            &row.changeset,
            &row.timestamp,
        ])
        .context("write way row")
}

fn write_way_node(writer: &mut Writer<File>, row: &WayNodeRow) -> Result<()> {
    let position = row.position.to_string();
    writer
        .write_record([row.id.as_str(), row.node_id.as_str(), position.as_str()])
        .context("write way node row")
}

fn write_tag(writer: &mut Writer<File>, row: &TagRow) -> Result<()> {
    writer
        .write_record([&row.id, &row.key, &row.value, &row.kind])
        .context("write tag row")
}
