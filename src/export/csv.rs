//! CSV report
//!
//! Same columns as the spreadsheet report, without the title row.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::LedgerEntry;

use super::html::REPORT_COLUMNS;

/// Write entries as CSV
pub fn write_csv_report<W: Write>(writer: W, entries: &[LedgerEntry]) -> LedgerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(REPORT_COLUMNS)
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    for entry in entries {
        csv_writer
            .write_record([
                entry.date().to_string(),
                entry.category.clone(),
                entry.summary.clone(),
                entry.income.to_string(),
                entry.expense.to_string(),
                entry.balance.to_string(),
            ])
            .map_err(|e| LedgerError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))
}
