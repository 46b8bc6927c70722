//! Preview command report data structures.

use super::output::{Output, Report};

/// Longest cell shown before truncation.
const MAX_CELL: usize = 32;

/// Report data from reading back a source's table.
#[derive(Debug)]
pub struct PreviewReport {
    pub source: String,
    pub table: String,
    /// Total rows in the table.
    pub row_count: usize,
    pub columns: Vec<String>,
    /// Sample rows as display text, NULL included.
    pub rows: Vec<Vec<String>>,
}

impl PreviewReport {
    fn render_table(&self) -> String {
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(|cell| truncate(cell)).collect())
            .collect();

        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                cells
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut lines = Vec::with_capacity(cells.len() + 2);
        lines.push(format_row(&self.columns, &widths));
        lines.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        for row in &cells {
            lines.push(format_row(row, &widths));
        }
        lines.join("\n")
    }
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

fn truncate(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL {
        return cell.to_string();
    }
    let kept: String = cell.chars().take(MAX_CELL - 1).collect();
    format!("{}…", kept)
}

impl Report for PreviewReport {
    fn render(&self, out: &mut dyn Output) {
        out.divider(&self.source);
        out.key_value_indented("table", &self.table);
        out.key_value_indented("rows", &self.row_count.to_string());
        out.newline();

        if self.rows.is_empty() {
            out.preformatted("(no rows)");
        } else {
            out.preformatted(&self.render_table());
        }
    }
}
