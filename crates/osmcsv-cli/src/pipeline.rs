//! Conversion pipeline with explicit stages.
//!
//! One pass, one element at a time: read, shape, optionally validate, write.
//! Nothing is retained across elements beyond the counters, so memory stays
//! bounded regardless of extract size. A normalization or validation failure
//! is fatal to the run; rows already written remain valid.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, info_span};

use osmcsv_ingest::ElementReader;
use osmcsv_model::ShapedElement;
use osmcsv_normalization::audit_street;
use osmcsv_output::CsvSink;
use osmcsv_transform::{STREET_KEY, shape};
use osmcsv_validate::validate_element;

/// Rows written per stream, plus what never reached output.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertCounts {
    pub nodes: usize,
    pub node_tags: usize,
    pub ways: usize,
    pub way_nodes: usize,
    pub way_tags: usize,
    /// Elements of kinds that shape to nothing.
    pub skipped_elements: usize,
    /// Tags dropped for problem characters in their keys.
    pub dropped_tags: usize,
}

/// Result of a conversion run.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertResult {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub validated: bool,
    pub counts: ConvertCounts,
}

/// Streams the extract once, writing every shaped element to the sink.
pub fn convert(input: &Path, output_dir: &Path, validate: bool) -> Result<ConvertResult> {
    let span = info_span!("convert", input = %input.display());
    let _guard = span.enter();

    let reader =
        ElementReader::from_path(input).with_context(|| format!("open {}", input.display()))?;
    let mut sink = CsvSink::create(output_dir)?;
    let mut counts = ConvertCounts::default();

    for element in reader {
        let element = element.context("read osm element")?;
        let raw_tag_count = element.tags.len();
        let Some(shaped) = shape(&element)? else {
            counts.skipped_elements += 1;
            continue;
        };
        if validate {
            validate_element(&shaped)?;
        }
        counts.dropped_tags += raw_tag_count - shaped.tag_count();
        tally(&mut counts, &shaped);
        sink.write(&shaped)?;
    }
    sink.finish()?;

    info!(
        nodes = counts.nodes,
        ways = counts.ways,
        dropped_tags = counts.dropped_tags,
        "conversion complete"
    );
    Ok(ConvertResult {
        input: input.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        validated: validate,
        counts,
    })
}

fn tally(counts: &mut ConvertCounts, shaped: &ShapedElement) {
    match shaped {
        ShapedElement::Node { tags, .. } => {
            counts.nodes += 1;
            counts.node_tags += tags.len();
        }
        ShapedElement::Way { nodes, tags, .. } => {
            counts.ways += 1;
            counts.way_nodes += nodes.len();
            counts.way_tags += tags.len();
        }
    }
}

/// Result of a street designation survey.
#[derive(Debug, Clone, Serialize)]
pub struct AuditResult {
    pub input: PathBuf,
    /// Non-canonical trailing designations, each with the full street values
    /// it appeared in.
    pub designations: BTreeMap<String, BTreeSet<String>>,
}

/// Streams the extract once, collecting street values whose trailing
/// designation falls outside the canonical set. Nothing is corrected; the
/// survey exists to grow the correction table deliberately.
pub fn audit(input: &Path) -> Result<AuditResult> {
    let span = info_span!("audit", input = %input.display());
    let _guard = span.enter();

    let reader =
        ElementReader::from_path(input).with_context(|| format!("open {}", input.display()))?;
    let mut designations = BTreeMap::new();

    for element in reader {
        let element = element.context("read osm element")?;
        for tag in &element.tags {
            if tag.key == STREET_KEY {
                audit_street(&mut designations, &tag.value);
            }
        }
    }

    debug!(
        designations = designations.len(),
        "street designation survey complete"
    );
    Ok(AuditResult {
        input: input.to_path_buf(),
        designations,
    })
}
