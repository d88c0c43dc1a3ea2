use anyhow::Result;

use super::{Renderer, Table};

/// Left-aligned fixed-width columns with a header line, no borders.
pub struct PlainTable;

/// One value per line, blank line between records. Meant for long
/// free-text fields where column alignment is useless.
pub struct PlainVerticalTable;

/// Pipe-delimited table with a rule under the header.
pub struct MarkdownTable;

/// Grid table with full ruling on every row.
pub struct RstTable;

/// Pipe-delimited rows without any ruling, as Confluence wiki markup.
pub struct ConfluenceTable;

impl Renderer for PlainTable {
    fn render(&self, table: &Table) -> Result<String> {
        let widths = column_widths(table);
        let mut lines = vec![plain_row(&titles(table), &widths)];
        for row in &table.rows {
            lines.push(plain_row(row, &widths));
        }
        Ok(lines.join("\n"))
    }
}

impl Renderer for PlainVerticalTable {
    fn render(&self, table: &Table) -> Result<String> {
        let mut output = String::new();
        for row in &table.rows {
            for value in row {
                output.push_str(value);
                output.push('\n');
            }
            output.push('\n');
        }
        Ok(output)
    }
}

impl Renderer for MarkdownTable {
    fn render(&self, table: &Table) -> Result<String> {
        let widths = column_widths(table);
        let mut lines = vec![
            bordered_row(&titles(table), &widths),
            rule(&widths, '|'),
        ];
        for row in &table.rows {
            lines.push(bordered_row(row, &widths));
        }
        Ok(lines.join("\n"))
    }
}

impl Renderer for RstTable {
    fn render(&self, table: &Table) -> Result<String> {
        let widths = column_widths(table);
        let grid = rule(&widths, '+');
        let mut lines = vec![grid.clone(), bordered_row(&titles(table), &widths), grid.clone()];
        for row in &table.rows {
            lines.push(bordered_row(row, &widths));
            lines.push(grid.clone());
        }
        Ok(lines.join("\n"))
    }
}

impl Renderer for ConfluenceTable {
    fn render(&self, table: &Table) -> Result<String> {
        let widths = column_widths(table);
        let mut lines = vec![bordered_row(&titles(table), &widths)];
        for row in &table.rows {
            lines.push(bordered_row(row, &widths));
        }
        Ok(lines.join("\n"))
    }
}

fn titles(table: &Table) -> Vec<String> {
    table.titles().iter().map(|t| t.to_string()).collect()
}

/// Widest line of header or cell content per column.
fn column_widths(table: &Table) -> Vec<usize> {
    let mut widths: Vec<usize> = table
        .fields
        .iter()
        .map(|field| field.title().chars().count())
        .collect();

    for row in &table.rows {
        for (i, value) in row.iter().enumerate() {
            let cell_width = value
                .lines()
                .map(|line| line.chars().count())
                .max()
                .unwrap_or(0);
            if i < widths.len() && cell_width > widths[i] {
                widths[i] = cell_width;
            }
        }
    }

    widths
}

fn plain_row(cells: &[String], widths: &[usize]) -> String {
    let line: String = cells
        .iter()
        .zip(widths.iter().copied())
        .map(|(value, width)| format!(" {value:<width$} "))
        .collect();
    line.trim_end().to_string()
}

fn bordered_row(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (value, width) in cells.iter().zip(widths.iter().copied()) {
        line.push_str(&format!(" {value:<width$} |"));
    }
    line
}

fn rule(widths: &[usize], junction: char) -> String {
    let mut line = String::new();
    line.push(junction);
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push(junction);
    }
    line
}
