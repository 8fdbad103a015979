use anyhow::{Context, Result};
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crf_model::ViolationKind;

use crate::types::{RecordOutcome, RunResult};

pub fn print_summary(result: &RunResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Form"),
        header_cell("Subject"),
        header_cell("Status"),
        header_cell("Errors"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Right);
    for record in &result.records {
        table.add_row(vec![
            dim_cell(record.index),
            Cell::new(record.form.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&record.subject_identifier),
            status_cell(record),
            count_cell(record.result.error_count()),
        ]);
    }
    table.add_row(vec![
        dim_cell("-"),
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} records", result.records.len())).add_attribute(Attribute::Bold),
        Cell::new(format!("{} failed", result.failed_count())).add_attribute(Attribute::Bold),
        count_cell(result.error_count()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    let lines = render_issue_lines(result);
    if !lines.is_empty() {
        println!();
        println!("Issues:");
        for line in lines {
            println!("- {line}");
        }
    }
}

/// One line per field error, in input order and then detection order.
pub fn render_issue_lines(result: &RunResult) -> Vec<String> {
    result
        .records
        .iter()
        .flat_map(|record| {
            record.result.field_errors().iter().map(move |error| {
                format!(
                    "#{} {} {}: {} ({})",
                    record.index,
                    record.form,
                    error.field,
                    error.message,
                    kind_label(error.kind)
                )
            })
        })
        .collect()
}

pub fn render_json(result: &RunResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("serialize validation report")
}

pub fn print_json(result: &RunResult) -> Result<()> {
    println!("{}", render_json(result)?);
    Ok(())
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
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

fn kind_label(kind: ViolationKind) -> &'static str {
    match kind {
        ViolationKind::FieldRequired => "required",
        ViolationKind::FieldApplicability => "applicability",
        ViolationKind::TemporalOrder => "date order",
        ViolationKind::TemporalWindow => "dosing window",
        ViolationKind::HistoryCountMismatch => "dose count",
        ViolationKind::HistoryProductMismatch => "dose product",
        ViolationKind::HistoryDateMismatch => "dose date",
        ViolationKind::EligibilityExclusion => "ineligible",
    }
}

fn status_cell(record: &RecordOutcome) -> Cell {
    if record.result.is_valid() {
        Cell::new("PASS")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("FAIL")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Red).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
