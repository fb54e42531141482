use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use metrics_model::{ImportResult, MatchReason};

pub fn print_import_summary(result: &ImportResult, headers: &[String]) {
    println!("Platform: {}", result.mapping.platform);
    println!("Rows: {}", result.rows.len());
    println!(
        "Fields extracted: {} of {}",
        result.extracted_fields, result.total_expected_fields
    );
    println!(
        "Confidence: {:.1}%",
        result.aggregate_confidence * 100.0
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Header"),
        header_cell("Field"),
        header_cell("Confidence"),
        header_cell("Matched via"),
    ]);
    apply_mapping_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for mapping in &result.mapping.mappings {
        let header = headers
            .get(mapping.column_index)
            .map_or("?", String::as_str);
        let reasons: Vec<&str> = mapping.reasons.iter().map(|r| reason_label(*r)).collect();
        table.add_row(vec![
            Cell::new(mapping.column_index),
            Cell::new(header),
            Cell::new(&mapping.field_id)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            confidence_cell(mapping.confidence),
            Cell::new(reasons.join(", ")),
        ]);
    }
    for field_id in &result.mapping.unresolved {
        table.add_row(vec![
            dim_cell("-"),
            dim_cell("-"),
            Cell::new(field_id).fg(Color::Red).add_attribute(Attribute::Bold),
            Cell::new("unresolved").fg(Color::Red),
            dim_cell("-"),
        ]);
    }
    println!("{table}");

    if result.requires_review {
        println!(
            "Review: REQUIRED ({} errors, {} failed rows)",
            result.errors.len(),
            result.failed_rows.len()
        );
    } else {
        println!("Review: not required");
    }
    if !result.warnings.is_empty() {
        println!("Warnings:");
        for warning in &result.warnings {
            println!("- {warning}");
        }
    }
    if !result.errors.is_empty() {
        eprintln!("Errors:");
        for error in &result.errors {
            eprintln!("- {error}");
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_mapping_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn confidence_cell(confidence: f64) -> Cell {
    let text = format!("{:.2}", confidence);
    if confidence >= 0.8 {
        Cell::new(text).fg(Color::Green)
    } else if confidence >= 0.5 {
        Cell::new(text).fg(Color::Yellow)
    } else {
        Cell::new(text).fg(Color::Red)
    }
}

fn reason_label(reason: MatchReason) -> &'static str {
    match reason {
        MatchReason::Exact => "exact",
        MatchReason::Alias => "alias",
        MatchReason::Pattern => "pattern",
        MatchReason::Type => "type",
        MatchReason::Similarity => "similarity",
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
