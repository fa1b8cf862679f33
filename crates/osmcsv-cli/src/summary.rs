//! Human-readable run summaries.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use osmcsv_output::{NODE_TAGS_FILE, NODES_FILE, WAY_NODES_FILE, WAY_TAGS_FILE, WAYS_FILE};

use crate::pipeline::{AuditResult, ConvertResult};

pub fn print_convert_summary(result: &ConvertResult) {
    println!("Input: {}", result.input.display());
    println!("Output: {}", result.output_dir.display());
    if result.validated {
        println!("Validation: enabled");
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stream"),
        header_cell("File"),
        header_cell("Rows"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);

    let counts = &result.counts;
    let rows = [
        ("nodes", NODES_FILE, counts.nodes),
        ("node tags", NODE_TAGS_FILE, counts.node_tags),
        ("ways", WAYS_FILE, counts.ways),
        ("way nodes", WAY_NODES_FILE, counts.way_nodes),
        ("way tags", WAY_TAGS_FILE, counts.way_tags),
    ];
    let mut total = 0usize;
    for (stream, file, count) in rows {
        total += count;
        table.add_row(vec![
            Cell::new(stream),
            Cell::new(file),
            Cell::new(count.to_string()),
        ]);
    }
    table.add_row(vec![
        header_cell("total"),
        Cell::new(""),
        header_cell(&total.to_string()),
    ]);
    println!("{table}");

    if counts.dropped_tags > 0 {
        println!("Dropped tags (problem characters in key): {}", counts.dropped_tags);
    }
    if counts.skipped_elements > 0 {
        println!("Skipped elements: {}", counts.skipped_elements);
    }
}

pub fn print_audit_summary(result: &AuditResult) {
    println!("Input: {}", result.input.display());
    if result.designations.is_empty() {
        println!("All street designations are canonical.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Designation"),
        header_cell("Values"),
        header_cell("Examples"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    for (designation, values) in &result.designations {
        let examples: Vec<&str> = values.iter().take(3).map(String::as_str).collect();
        table.add_row(vec![
            Cell::new(designation),
            Cell::new(values.len().to_string()),
            Cell::new(examples.join("; ")),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
