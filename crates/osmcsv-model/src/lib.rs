pub mod element;
pub mod error;
pub mod records;
pub mod schema;

pub use element::{Element, ElementKind, RawTag};
pub use error::{ConvertError, Result};
pub use records::{NodeRow, ShapedElement, TagRow, WayNodeRow, WayRow};
pub use schema::{
    FieldKind, FieldSpec, FieldViolation, NODE_SCHEMA, NODE_TAG_SCHEMA, RecordSchema, SchemaReport,
    WAY_NODE_SCHEMA, WAY_SCHEMA, WAY_TAG_SCHEMA,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_kind_round_trips() {
        for kind in [ElementKind::Node, ElementKind::Way, ElementKind::Relation] {
            assert_eq!(kind.as_str().parse::<ElementKind>().unwrap(), kind);
            assert_eq!(
                ElementKind::from_tag_name(kind.as_str().as_bytes()),
                Some(kind)
            );
        }
        assert_eq!(ElementKind::from_tag_name(b"bounds"), None);
    }

    #[test]
    fn schema_field_order_matches_output_columns() {
        let names: Vec<&str> = NODE_SCHEMA.fields.iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            vec![
                "id",
                "lat",
                "lon",
                "user",
                "uid",
                "version",
                "changeset",
                "timestamp"
            ]
        );
        let names: Vec<&str> = WAY_NODE_SCHEMA.fields.iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["id", "node_id", "position"]);
    }

    #[test]
    fn schema_report_lists_every_violation() {
        let mut report = SchemaReport::new("node", "42");
        report.push("nodes.lat".to_string(), vec!["\"x\" is not a number".to_string()]);
        report.push(
            "nodes.uid".to_string(),
            vec!["\"\" is not an integer".to_string()],
        );
        let rendered = report.to_string();
        assert!(rendered.contains("node 42 failed schema validation"));
        assert!(rendered.contains("nodes.lat"));
        assert!(rendered.contains("nodes.uid"));
    }

    #[test]
    fn tag_row_serializes_kind_as_type() {
        let row = TagRow {
            id: "1".to_string(),
            key: "street".to_string(),
            value: "Хрещатик вулиця".to_string(),
            kind: "addr".to_string(),
        };
        let json = serde_json::to_string(&row).expect("serialize tag row");
        assert!(json.contains("\"type\":\"addr\""));
        let round: TagRow = serde_json::from_str(&json).expect("deserialize tag row");
        assert_eq!(round, row);
    }
}
