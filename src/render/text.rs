//! Plain-text rendering of the catalog, served at `/reports.txt`

use std::fmt::Write;

use crate::models::{Cell, ReportData, ReportResult, ResultSeries, ResultTable};

/// Render every result one after another, separated by blank lines
pub fn render_catalog_text(results: &[ReportResult]) -> String {
    let mut out = String::new();
    for result in results {
        let _ = writeln!(out, "[{}] {}", result.id, result.title);
        out.push_str(&render_report_text(result));
        out.push('\n');
    }
    out
}

/// Render one result without its header line
pub fn render_report_text(result: &ReportResult) -> String {
    match &result.data {
        ReportData::Table(table) => render_rows(&table.columns, &table_cells(table)),
        ReportData::Series(series) => render_rows(
            &[series.index_name.clone(), series.value_name.clone()],
            &series_cells(series),
        ),
        ReportData::Scalar(scalar) => format!("{}: {}\n", scalar.label, scalar.display),
    }
}

fn table_cells(table: &ResultTable) -> Vec<Vec<String>> {
    table
        .rows
        .iter()
        .map(|row| row.iter().map(Cell::to_string).collect())
        .collect()
}

fn series_cells(series: &ResultSeries) -> Vec<Vec<String>> {
    series
        .points
        .iter()
        .map(|point| vec![point.label.clone(), point.value.to_string()])
        .collect()
}

fn render_rows(columns: &[String], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return "(no rows)\n".to_string();
    }

    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, columns, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
