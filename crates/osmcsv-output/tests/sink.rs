//! Sink output layout and round-tripping.

use osmcsv_model::{NodeRow, ShapedElement, TagRow, WayNodeRow, WayRow};
use osmcsv_output::{
    CsvSink, NODE_TAGS_FILE, NODES_FILE, WAY_NODES_FILE, WAY_TAGS_FILE, WAYS_FILE,
};

fn sample_node() -> ShapedElement {
    ShapedElement::Node {
        row: NodeRow {
            id: "1".to_string(),
            lat: "50.4501".to_string(),
            lon: "30.5234".to_string(),
            user: "Данило".to_string(),
            uid: "175".to_string(),
            version: "3".to_string(),
            changeset: "2193".to_string(),
            timestamp: "2017-03-01T12:00:00Z".to_string(),
        },
        tags: vec![TagRow {
            id: "1".to_string(),
            key: "street".to_string(),
            value: "Хрещатик вулиця, 12".to_string(),
            kind: "addr".to_string(),
        }],
    }
}

fn sample_way() -> ShapedElement {
    ShapedElement::Way {
        row: WayRow {
            id: "10".to_string(),
            user: "editor".to_string(),
            uid: "92".to_string(),
            version: "5".to_string(),
            changeset: "4412".to_string(),
            timestamp: "2017-03-02T08:30:00Z".to_string(),
        },
        nodes: vec![
            WayNodeRow {
                id: "10".to_string(),
                node_id: "1".to_string(),
                position: 0,
            },
            WayNodeRow {
                id: "10".to_string(),
                node_id: "2".to_string(),
                position: 1,
            },
        ],
        tags: vec![TagRow {
            id: "10".to_string(),
            key: "highway".to_string(),
            value: "residential".to_string(),
            kind: "regular".to_string(),
        }],
    }
}

fn read_rows(path: &std::path::Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).expect("open csv");
    let headers = reader
        .headers()
        .expect("headers")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|record| {
            record
                .expect("record")
                .iter()
                .map(str::to_string)
                .collect()
        })
        .collect();
    (headers, rows)
}

#[test]
fn writes_headers_and_rows_in_fixed_column_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut sink = CsvSink::create(dir.path()).expect("create sink");
    sink.write(&sample_node()).expect("write node");
    sink.write(&sample_way()).expect("write way");
    sink.finish().expect("finish");

    let (headers, rows) = read_rows(&dir.path().join(NODES_FILE));
    assert_eq!(
        headers,
        vec!["id", "lat", "lon", "user", "uid", "version", "changeset", "timestamp"]
    );
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "1");
    assert_eq!(rows[0][3], "Данило");

    let (headers, rows) = read_rows(&dir.path().join(NODE_TAGS_FILE));
    assert_eq!(headers, vec!["id", "key", "value", "type"]);
    // Multi-byte text and an embedded comma round-trip through quoting.
    assert_eq!(rows[0], vec!["1", "street", "Хрещатик вулиця, 12", "addr"]);

    let (headers, rows) = read_rows(&dir.path().join(WAYS_FILE));
    assert_eq!(
        headers,
        vec!["id", "user", "uid", "version", "changeset", "timestamp"]
    );
    assert_eq!(rows.len(), 1);

    let (headers, rows) = read_rows(&dir.path().join(WAY_NODES_FILE));
    assert_eq!(headers, vec!["id", "node_id", "position"]);
    assert_eq!(
        rows,
        vec![vec!["10", "1", "0"], vec!["10", "2", "1"]]
    );

    let (headers, rows) = read_rows(&dir.path().join(WAY_TAGS_FILE));
    assert_eq!(headers, vec!["id", "key", "value", "type"]);
    assert_eq!(rows[0], vec!["10", "highway", "residential", "regular"]);
}

#[test]
fn empty_run_still_produces_all_headers() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sink = CsvSink::create(dir.path()).expect("create sink");
    sink.finish().expect("finish");

    for file in [
        NODES_FILE,
        NODE_TAGS_FILE,
        WAYS_FILE,
        WAY_NODES_FILE,
        WAY_TAGS_FILE,
    ] {
        let (headers, rows) = read_rows(&dir.path().join(file));
        assert!(!headers.is_empty(), "{file} missing headers");
        assert!(rows.is_empty(), "{file} unexpectedly has rows");
    }
}
