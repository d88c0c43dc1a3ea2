use anyhow::Result;

use crate::cli::OutputFormat;
use crate::fields::OutputField;

pub mod csv;
pub mod html;
pub mod json;
pub mod text;

/// Field list plus projected rows, ready for serialization. Rows are
/// plain strings; the renderer decides quoting and escaping.
pub struct Table {
    pub fields: Vec<OutputField>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn titles(&self) -> Vec<&'static str> {
        self.fields.iter().map(|field| field.title()).collect()
    }
}

/// One serialization strategy per output format.
pub trait Renderer {
    fn render(&self, table: &Table) -> Result<String>;
}

pub fn renderer_for(format: OutputFormat) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Plain => Box::new(text::PlainTable),
        OutputFormat::PlainVertical => Box::new(text::PlainVerticalTable),
        OutputFormat::Markdown => Box::new(text::MarkdownTable),
        OutputFormat::Rst => Box::new(text::RstTable),
        OutputFormat::Confluence => Box::new(text::ConfluenceTable),
        OutputFormat::Html => Box::new(html::HtmlTable),
        OutputFormat::Json => Box::new(json::JsonTable),
        OutputFormat::JsonLicenseFinder => Box::new(json::JsonLicenseFinderTable),
        OutputFormat::Csv => Box::new(csv::CsvTable),
    }
}

/// Stable full-row sort by the designated column before serialization.
/// Count compares numerically, everything else by string value. A sort
/// column that is not part of the field list leaves the enumeration
/// order untouched.
pub fn sort_rows(table: &mut Table, sort_field: OutputField) {
    let Some(idx) = table.fields.iter().position(|field| *field == sort_field) else {
        return;
    };

    if sort_field == OutputField::Count {
        table
            .rows
            .sort_by_key(|row| row[idx].parse::<usize>().unwrap_or(0));
    } else {
        table.rows.sort_by(|a, b| a[idx].cmp(&b[idx]));
    }
}

#[cfg(test)]
pub(crate) fn string_rows(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}
