use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use crate::types::CheckResult;

pub fn print_summary(result: &CheckResult) {
    let summary = &result.checked.summary;
    println!("File: {}", result.source_file.display());
    println!(
        "Variant: {} ({})",
        summary.variant.label(),
        summary.variant.as_str()
    );
    println!(
        "Records: {}  Anomalies: {}",
        summary.total_records, summary.anomaly_count
    );
    for path in &result.exports {
        println!("Written: {}", path.display());
    }

    if summary.rows.is_empty() {
        println!("No anomalies found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Type d'anomalie"),
        header_cell("Code"),
        header_cell("Nombre de cas"),
        header_cell("Corrigés"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    let mut total = 0usize;
    for row in &summary.rows {
        total += row.occurrences;
        table.add_row(vec![
            Cell::new(row.label),
            dim_cell(row.fault.code()),
            count_cell(Some(row.occurrences), Color::Red),
            count_cell(row.corrected, Color::Green),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total).add_attribute(Attribute::Bold),
        count_cell(Some(summary.total_corrected()), Color::Green).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
    if table.column_count() >= 5 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(3)),
            ColumnConstraint::UpperBoundary(Width::Fixed(30)),
            ColumnConstraint::UpperBoundary(Width::Percentage(35)),
            ColumnConstraint::UpperBoundary(Width::Percentage(35)),
            ColumnConstraint::UpperBoundary(Width::Fixed(30)),
        ]);
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(55)),
            ColumnConstraint::UpperBoundary(Width::Fixed(30)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
