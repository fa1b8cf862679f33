//! End-to-end conversion over a small extract.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use osmcsv_cli::pipeline::{audit, convert};

const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6" generator="test">
  <node id="261114064" lat="50.4501" lon="30.5234" user="Данило" uid="175" version="3" changeset="2193" timestamp="2017-03-01T12:00:00Z">
    <tag k="addr:street" v="Хрещатик вул."/>
    <tag k="phone" v="044 425 12 34"/>
  </node>
  <node id="261114065" lat="50.4510" lon="30.5240" user="editor" uid="92" version="1" changeset="4412" timestamp="2017-03-01T13:00:00Z"/>
  <way id="24864835" user="editor" uid="92" version="5" changeset="4412" timestamp="2017-03-02T08:30:00Z">
    <nd ref="261114064"/>
    <nd ref="261114065"/>
    <tag k="highway" v="residential"/>
    <tag k="name:uk" v="Хрещатик"/>
  </way>
  <relation id="9000" version="1">
    <member type="way" ref="24864835" role="outer"/>
  </relation>
</osm>
"#;

fn write_sample(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("sample.osm");
    fs::write(&path, contents).expect("write sample extract");
    path
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::Reader::from_path(path).expect("open csv");
    reader
        .records()
        .map(|record| {
            record
                .expect("record")
                .iter()
                .map(str::to_string)
                .collect()
        })
        .collect()
}

#[test]
fn converts_a_two_element_extract() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_sample(dir.path(), SAMPLE);
    let output_dir = dir.path().join("csv");

    let result = convert(&input, &output_dir, true).expect("convert");
    let counts = &result.counts;
    assert_eq!(counts.nodes, 2);
    assert_eq!(counts.ways, 1);
    assert_eq!(counts.way_nodes, 2);
    assert!(counts.node_tags >= 1);
    assert!(counts.way_tags >= 2);
    assert_eq!(counts.dropped_tags, 0);

    let input_ids: BTreeSet<&str> = ["261114064", "261114065", "24864835"].into();

    let node_rows = read_rows(&output_dir.join("nodes.csv"));
    assert_eq!(node_rows.len(), 2);
    for row in &node_rows {
        assert!(input_ids.contains(row[0].as_str()), "unknown node id {}", row[0]);
    }

    let node_tag_rows = read_rows(&output_dir.join("nodes_tags.csv"));
    assert_eq!(node_tag_rows.len(), 2);
    let street = node_tag_rows
        .iter()
        .find(|row| row[1] == "street")
        .expect("street tag row");
    assert_eq!(street[0], "261114064");
    assert_eq!(street[2], "Хрещатик вулиця");
    assert_eq!(street[3], "addr");
    let phone = node_tag_rows
        .iter()
        .find(|row| row[1] == "phone")
        .expect("phone tag row");
    assert_eq!(phone[2], "+38-044-425-1234");
    assert_eq!(phone[3], "regular");

    let way_rows = read_rows(&output_dir.join("ways.csv"));
    assert_eq!(way_rows.len(), 1);
    assert_eq!(way_rows[0][0], "24864835");

    let way_node_rows = read_rows(&output_dir.join("ways_nodes.csv"));
    assert_eq!(
        way_node_rows,
        vec![
            vec!["24864835", "261114064", "0"],
            vec!["24864835", "261114065", "1"],
        ]
    );
    for row in &way_node_rows {
        assert!(input_ids.contains(row[1].as_str()), "unknown node ref {}", row[1]);
    }

    let way_tag_rows = read_rows(&output_dir.join("ways_tags.csv"));
    assert_eq!(way_tag_rows.len(), 2);
    let name = way_tag_rows
        .iter()
        .find(|row| row[1] == "uk")
        .expect("namespaced name tag");
    assert_eq!(name[3], "name");
}

#[test]
fn unmappable_phone_value_fails_the_run() {
    let dir = tempfile::tempdir().expect("tempdir");
    let broken = SAMPLE.replace("044 425 12 34", "ask at the counter");
    let input = write_sample(dir.path(), &broken);

    let error = convert(&input, &dir.path().join("csv"), false).expect_err("must fail");
    assert!(
        format!("{error:#}").contains("phone value"),
        "unexpected error: {error:#}"
    );
}

#[test]
fn validation_failure_names_the_offending_fields() {
    let dir = tempfile::tempdir().expect("tempdir");
    let broken = SAMPLE.replace("lat=\"50.4501\"", "lat=\"fifty\"");
    let input = write_sample(dir.path(), &broken);

    // Without validation the raw text passes through.
    convert(&input, &dir.path().join("raw"), false).expect("convert without validation");

    let error = convert(&input, &dir.path().join("csv"), true).expect_err("must fail");
    let rendered = format!("{error:#}");
    assert!(rendered.contains("nodes.lat"), "unexpected error: {rendered}");
}

#[test]
fn audit_surveys_non_canonical_designations() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_sample(dir.path(), SAMPLE);

    let result = audit(&input).expect("audit");
    let values = result
        .designations
        .get("вул.")
        .expect("non-canonical designation bucket");
    assert!(values.contains("Хрещатик вул."));
}
