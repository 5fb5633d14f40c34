//! Spreadsheet report as an HTML table
//!
//! Spreadsheet applications open an HTML table saved with an `.xls`
//! extension as a workbook. The document carries a UTF-8 meta tag so the
//! Chinese text survives.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::LedgerEntry;

/// Column headers of every report
pub const REPORT_COLUMNS: [&str; 6] = ["日期", "分类", "摘要", "收入", "支出", "余额"];

/// Escape text for an HTML cell
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Write the report document
pub fn write_html_report<W: Write>(
    writer: &mut W,
    title: &str,
    entries: &[LedgerEntry],
) -> LedgerResult<()> {
    let mut doc = String::new();

    doc.push_str("<html><head><meta charset=\"UTF-8\"></head><body><table>\n");
    doc.push_str(&format!(
        "<tr><th colspan=\"{}\">{}</th></tr>\n",
        REPORT_COLUMNS.len(),
        escape_html(title)
    ));

    doc.push_str("<tr>");
    for column in REPORT_COLUMNS {
        doc.push_str(&format!("<th>{}</th>", column));
    }
    doc.push_str("</tr>\n");

    for entry in entries {
        doc.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            entry.date(),
            escape_html(&entry.category),
            escape_html(&entry.summary),
            entry.income,
            entry.expense,
            entry.balance
        ));
    }

    doc.push_str("</table></body></html>\n");

    writer
        .write_all(doc.as_bytes())
        .map_err(|e| LedgerError::Export(e.to_string()))
}
