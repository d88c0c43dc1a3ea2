use anyhow::Result;

use super::{Renderer, Table};

/// An HTML `<table>` with a header row, values escaped.
pub struct HtmlTable;

impl Renderer for HtmlTable {
    fn render(&self, table: &Table) -> Result<String> {
        let mut out = String::from("<table>\n    <thead>\n        <tr>\n");
        for title in table.titles() {
            out.push_str(&format!("            <th>{}</th>\n", escape(title)));
        }
        out.push_str("        </tr>\n    </thead>\n    <tbody>\n");
        for row in &table.rows {
            out.push_str("        <tr>\n");
            for value in row {
                out.push_str(&format!("            <td>{}</td>\n", escape(value)));
            }
            out.push_str("        </tr>\n");
        }
        out.push_str("    </tbody>\n</table>");
        Ok(out)
    }
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
