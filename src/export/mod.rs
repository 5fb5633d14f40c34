//! Export module for lx-ledger
//!
//! Report export in two formats:
//! - XLS: HTML table that spreadsheet applications open directly
//! - CSV: plain comma-separated values
//!
//! Full-ledger backups live in the `backup` module.

pub mod csv;
pub mod filter;
pub mod html;
pub mod report;

pub use self::csv::write_csv_report;
pub use filter::EntryFilter;
pub use html::{escape_html, write_html_report, REPORT_COLUMNS};
pub use report::{export_report, render_report, report_file_name, ReportOptions};
