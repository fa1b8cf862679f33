//! Element shaping.
//!
//! One decoded element becomes one node or way record plus its dependent
//! rows. Node attributes are forgiving (missing values take a fixed
//! placeholder, matching the lone incomplete entry in the audited extract);
//! way attributes are required and a gap is fatal.

use tracing::trace;

use osmcsv_model::{
    ConvertError, Element, ElementKind, NodeRow, Result, ShapedElement, TagRow, WayNodeRow, WayRow,
};

use crate::classify::classify;

/// Substituted for any missing node attribute.
pub const MISSING_ATTRIBUTE_PLACEHOLDER: &str = "111111";

/// Shapes one element into its output records.
///
/// Elements of kinds other than node/way shape to `None`; that is an
/// intentionally empty result, not a failure.
pub fn shape(element: &Element) -> Result<Option<ShapedElement>> {
    match element.kind {
        ElementKind::Node => shape_node(element).map(Some),
        ElementKind::Way => shape_way(element).map(Some),
        ElementKind::Relation => {
            trace!("relation elements are not shaped");
            Ok(None)
        }
    }
}

fn shape_node(element: &Element) -> Result<ShapedElement> {
    let row = NodeRow {
        id: node_attribute(element, "id"),
        lat: node_attribute(element, "lat"),
        lon: node_attribute(element, "lon"),
        user: node_attribute(element, "user"),
        uid: node_attribute(element, "uid"),
        version: node_attribute(element, "version"),
        changeset: node_attribute(element, "changeset"),
        timestamp: node_attribute(element, "timestamp"),
    };
    let tags = classify_tags(&row.id, element)?;
    Ok(ShapedElement::Node { row, tags })
}

fn shape_way(element: &Element) -> Result<ShapedElement> {
    let row = WayRow {
        id: required_attribute(element, "id")?,
        user: required_attribute(element, "user")?,
        uid: required_attribute(element, "uid")?,
        version: required_attribute(element, "version")?,
        changeset: required_attribute(element, "changeset")?,
        timestamp: required_attribute(element, "timestamp")?,
    };
    let tags = classify_tags(&row.id, element)?;
    let nodes = element
        .node_refs
        .iter()
        .enumerate()
        .map(|(position, node_id)| WayNodeRow {
            id: row.id.clone(),
            node_id: node_id.clone(),
            position,
        })
        .collect();
    Ok(ShapedElement::Way { row, nodes, tags })
}

fn node_attribute(element: &Element, name: &str) -> String {
    match element.attribute(name) {
        Some(value) => value.to_string(),
        None => MISSING_ATTRIBUTE_PLACEHOLDER.to_string(),
    }
}

fn required_attribute(element: &Element, name: &'static str) -> Result<String> {
    element
        .attribute(name)
        .map(str::to_string)
        .ok_or_else(|| ConvertError::MissingAttribute {
            id: element.attribute("id").unwrap_or("?").to_string(),
            attribute: name,
        })
}

fn classify_tags(element_id: &str, element: &Element) -> Result<Vec<TagRow>> {
    let mut tags = Vec::with_capacity(element.tags.len());
    for tag in &element.tags {
        if let Some(row) = classify(element_id, &tag.key, &tag.value)? {
            tags.push(row);
        }
    }
    Ok(tags)
}
