use anyhow::Result;

use super::{Renderer, Table};

/// RFC 4180 style: every field is quoted, embedded double quotes are
/// doubled. Quoting everything means commas never need special casing.
pub struct CsvTable;

impl Renderer for CsvTable {
    fn render(&self, table: &Table) -> Result<String> {
        let mut lines = Vec::with_capacity(table.rows.len() + 1);

        let header: Vec<String> = table.titles().iter().map(|t| t.to_string()).collect();
        lines.push(csv_row(&header));
        for row in &table.rows {
            lines.push(csv_row(row));
        }

        Ok(lines.join("\n"))
    }
}

fn csv_row(cells: &[String]) -> String {
    cells
        .iter()
        .map(|value| format!("\"{}\"", value.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}
