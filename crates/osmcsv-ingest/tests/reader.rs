//! Reader behavior over an in-memory OSM document.

use std::io::Cursor;

use osmcsv_ingest::ElementReader;
use osmcsv_model::{Element, ElementKind};

const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6" generator="test">
  <bounds minlat="50.40" minlon="30.49" maxlat="50.48" maxlon="30.56"/>
  <node id="261114064" lat="50.4501" lon="30.5234" user="Данило" uid="175" version="3" changeset="2193" timestamp="2017-03-01T12:00:00Z">
    <tag k="addr:street" v="Хрещатик вул."/>
    <tag k="amenity" v="cafe &amp; bar"/>
  </node>
  <node id="261114065" lat="50.4510" lon="30.5240"/>
  <way id="24864835" user="editor" uid="92" version="5" changeset="4412" timestamp="2017-03-02T08:30:00Z">
    <nd ref="261114064"/>
    <nd ref="261114065"/>
    <tag k="highway" v="residential"/>
  </way>
  <relation id="9000" version="1">
    <member type="way" ref="24864835" role="outer"/>
    <tag k="type" v="multipolygon"/>
  </relation>
</osm>
"#;

fn read_all(document: &str) -> Vec<Element> {
    ElementReader::from_reader(Cursor::new(document.as_bytes()))
        .collect::<Result<Vec<_>, _>>()
        .expect("read sample document")
}

#[test]
fn yields_nodes_and_ways_skipping_relations() {
    let elements = read_all(SAMPLE);
    let kinds: Vec<ElementKind> = elements.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![ElementKind::Node, ElementKind::Node, ElementKind::Way]
    );
}

#[test]
fn decodes_attributes_and_unescapes_tag_values() {
    let elements = read_all(SAMPLE);
    let node = &elements[0];
    assert_eq!(node.attribute("id"), Some("261114064"));
    assert_eq!(node.attribute("user"), Some("Данило"));
    assert_eq!(node.attribute("missing"), None);
    assert_eq!(node.tags.len(), 2);
    assert_eq!(node.tags[0].key, "addr:street");
    assert_eq!(node.tags[0].value, "Хрещатик вул.");
    assert_eq!(node.tags[1].value, "cafe & bar");
}

#[test]
fn self_closing_node_has_no_children() {
    let elements = read_all(SAMPLE);
    let node = &elements[1];
    assert_eq!(node.attribute("id"), Some("261114065"));
    assert!(node.tags.is_empty());
    assert!(node.node_refs.is_empty());
}

#[test]
fn way_references_preserve_document_order() {
    let elements = read_all(SAMPLE);
    let way = &elements[2];
    assert_eq!(way.kind, ElementKind::Way);
    assert_eq!(way.node_refs, vec!["261114064", "261114065"]);
    assert_eq!(way.tags.len(), 1);
    assert_eq!(way.tags[0].key, "highway");
}

#[test]
fn kind_filter_restricts_output() {
    let elements = ElementReader::from_reader(Cursor::new(SAMPLE.as_bytes()))
        .with_kinds(&[ElementKind::Way])
        .collect::<Result<Vec<_>, _>>()
        .expect("read ways only");
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0].kind, ElementKind::Way);
}

#[test]
fn truncated_document_is_malformed() {
    let truncated = r#"<osm><node id="1" lat="0" lon="0">"#;
    let result: Result<Vec<_>, _> =
        ElementReader::from_reader(Cursor::new(truncated.as_bytes())).collect();
    let error = result.expect_err("truncated document must fail");
    assert!(
        error.to_string().contains("malformed osm document"),
        "unexpected error: {error}"
    );
}

#[test]
fn mismatched_end_tag_is_malformed() {
    let broken = r#"<osm><way id="1"><nd ref="2"></osm>"#;
    let result: Result<Vec<_>, _> =
        ElementReader::from_reader(Cursor::new(broken.as_bytes())).collect();
    assert!(result.is_err());
}
