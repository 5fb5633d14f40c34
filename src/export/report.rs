//! Report export to a file
//!
//! Renders the selected entries, writes the report into the target
//! directory under a dated file name and records the export in the
//! activity log. Nothing is logged when rendering or writing fails.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::config::ReportFormat;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::activity::ACTION_EXPORT;
use crate::models::LedgerEntry;
use crate::storage::write_atomic;

use super::csv::write_csv_report;
use super::html::write_html_report;

/// File name prefix of exported reports
pub const REPORT_FILE_PREFIX: &str = "财务报表";

/// What to export and where
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub format: ReportFormat,
    /// Title row text
    pub title: String,
    /// Date-range label appended to the title
    pub range_label: Option<String>,
    pub output_dir: PathBuf,
}

impl ReportOptions {
    /// Title with the range label, if any
    pub fn full_title(&self) -> String {
        match &self.range_label {
            Some(label) => format!("{} ({})", self.title, label),
            None => self.title.clone(),
        }
    }
}

/// `财务报表_YYYY-MM-DD.<ext>`
pub fn report_file_name(format: ReportFormat, date: NaiveDate) -> String {
    format!(
        "{}_{}.{}",
        REPORT_FILE_PREFIX,
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Render a report into memory
pub fn render_report(entries: &[LedgerEntry], options: &ReportOptions) -> LedgerResult<Vec<u8>> {
    let mut buffer = Vec::new();
    match options.format {
        ReportFormat::Xls => write_html_report(&mut buffer, &options.full_title(), entries)?,
        ReportFormat::Csv => write_csv_report(&mut buffer, entries)?,
    }
    Ok(buffer)
}

/// Write a report of `entries` and log the export on the ledger
///
/// Returns the path of the written file.
pub fn export_report(
    ledger: &mut Ledger,
    entries: &[LedgerEntry],
    options: &ReportOptions,
) -> LedgerResult<PathBuf> {
    let today = Local::now().date_naive();
    let path = options
        .output_dir
        .join(report_file_name(options.format, today));

    let contents = render_report(entries, options)?;
    write_report(&path, &contents)?;

    ledger.log_action(ACTION_EXPORT, format!("导出了 {} 条记录", entries.len()));
    info!(path = %path.display(), count = entries.len(), "report exported");

    Ok(path)
}

fn write_report(path: &Path, contents: &[u8]) -> LedgerResult<()> {
    write_atomic(path, contents).map_err(|e| LedgerError::Export(e.to_string()))
}
