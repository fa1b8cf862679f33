//! Structural validation of shaped records.
//!
//! Every row of a shaped element is checked against the declared schema of
//! its output stream: integer columns must coerce to integers, coordinate
//! columns to numbers. All violations across all rows are aggregated into
//! one report before anything surfaces, so a failing element names every
//! offending field at once rather than the first mismatch.
//!
//! Validation is opt-in at the pipeline level; the checks here never decide
//! when they run.

use osmcsv_model::{
    ConvertError, FieldKind, FieldSpec, NODE_SCHEMA, NODE_TAG_SCHEMA, NodeRow, RecordSchema,
    Result, SchemaReport, ShapedElement, TagRow, WAY_NODE_SCHEMA, WAY_SCHEMA, WAY_TAG_SCHEMA,
    WayNodeRow, WayRow,
};

/// Validates one shaped element, failing with a [`ConvertError::Schema`]
/// carrying every violated field.
pub fn validate_element(shaped: &ShapedElement) -> Result<()> {
    let report = check_element(shaped);
    if report.is_empty() {
        Ok(())
    } else {
        Err(ConvertError::Schema(report))
    }
}

/// Collects schema violations for one shaped element without failing.
pub fn check_element(shaped: &ShapedElement) -> SchemaReport {
    let mut report = SchemaReport::new(shaped.kind().as_str(), shaped.id());
    match shaped {
        ShapedElement::Node { row, tags } => {
            check_row(&mut report, &NODE_SCHEMA, None, &node_values(row));
            check_tag_rows(&mut report, &NODE_TAG_SCHEMA, tags);
        }
        ShapedElement::Way { row, nodes, tags } => {
            check_row(&mut report, &WAY_SCHEMA, None, &way_values(row));
            for (index, node) in nodes.iter().enumerate() {
                let position = node.position.to_string();
                check_row(
                    &mut report,
                    &WAY_NODE_SCHEMA,
                    Some(index),
                    &way_node_values(node, &position),
                );
            }
            check_tag_rows(&mut report, &WAY_TAG_SCHEMA, tags);
        }
    }
    report
}

fn check_tag_rows(report: &mut SchemaReport, schema: &RecordSchema, tags: &[TagRow]) {
    for (index, tag) in tags.iter().enumerate() {
        check_row(report, schema, Some(index), &tag_values(tag));
    }
}

/// Values of a row in schema field order.
fn node_values<'r>(row: &'r NodeRow) -> [&'r str; 8] {
    [
        &row.id,
        &row.lat,
        &row.lon,
        &row.user,
        &row.uid,
        &row.version,
        &row.changeset,
        &row.timestamp,
    ]
}

fn way_values<'r>(row: &'r WayRow) -> [&'r str; 6] {
    [
        &row.id,
        &row.user,
        &row.uid,
        &row.version,
        &row.changeset,
        &row.timestamp,
    ]
}

fn way_node_values<'r>(row: &'r WayNodeRow, position: &'r str) -> [&'r str; 3] {
    [&row.id, &row.node_id, position]
}

fn tag_values<'r>(row: &'r TagRow) -> [&'r str; 4] {
    [&row.id, &row.key, &row.value, &row.kind]
}

fn check_row(
    report: &mut SchemaReport,
    schema: &RecordSchema,
    index: Option<usize>,
    values: &[&str],
) {
    debug_assert_eq!(schema.fields.len(), values.len());
    for (spec, value) in schema.fields.iter().zip(values) {
        let reasons = check_cell(spec, value);
        if !reasons.is_empty() {
            report.push(qualified_field(schema, index, spec.name), reasons);
        }
    }
}

fn check_cell(spec: &FieldSpec, value: &str) -> Vec<String> {
    let mut reasons = Vec::new();
    match spec.kind {
        FieldKind::Integer => {
            if value.parse::<i64>().is_err() {
                reasons.push(format!("{value:?} is not an integer"));
            }
        }
        FieldKind::Float => {
            if value.parse::<f64>().is_err() {
                reasons.push(format!("{value:?} is not a number"));
            }
        }
        FieldKind::Text => {}
    }
    reasons
}

fn qualified_field(schema: &RecordSchema, index: Option<usize>, name: &str) -> String {
    match index {
        Some(index) => format!("{}[{index}].{name}", schema.record),
        None => format!("{}.{name}", schema.record),
    }
}
