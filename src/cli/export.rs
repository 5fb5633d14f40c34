//! CLI command for report export

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::config::{LedgerPaths, ReportFormat, Settings};
use crate::error::LedgerResult;
use crate::export::{export_report, EntryFilter, ReportOptions};
use crate::ledger::Ledger;
use crate::models::EntryDate;

/// Report format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// HTML table opened by spreadsheet applications
    Xls,
    /// Comma-separated values
    Csv,
}

impl From<ExportFormat> for ReportFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Xls => ReportFormat::Xls,
            ExportFormat::Csv => ReportFormat::Csv,
        }
    }
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Report format (defaults to the configured one)
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,

    /// First date to include (Y-M-D)
    #[arg(long)]
    pub from: Option<EntryDate>,

    /// Last date to include (Y-M-D)
    #[arg(long)]
    pub to: Option<EntryDate>,

    /// Output directory (defaults to the exports directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn handle_export(
    ledger: &mut Ledger,
    paths: &LedgerPaths,
    settings: &Settings,
    args: &ExportArgs,
) -> LedgerResult<()> {
    let filter = EntryFilter {
        from: args.from,
        to: args.to,
        category: None,
    };
    let entries = filter.apply(ledger.entries());

    let options = ReportOptions {
        format: args
            .format
            .map(ReportFormat::from)
            .unwrap_or(settings.export.default_format),
        title: settings.export.title.clone(),
        range_label: filter.range_label(),
        output_dir: args.output.clone().unwrap_or_else(|| paths.export_dir()),
    };

    let path = export_report(ledger, &entries, &options)?;

    println!("Exported {} entries", entries.len());
    println!("Location: {}", path.display());
    Ok(())
}
