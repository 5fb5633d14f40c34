//! Report CLI commands
//!
//! Activity history and the ledger summary.

use crate::display::{format_activity_table, format_category_breakdown, format_daily_summaries};
use crate::error::LedgerResult;
use crate::ledger::Ledger;
use crate::reports::{category_breakdown, daily_summaries, LedgerSummary};

pub fn handle_history(ledger: &Ledger, limit: Option<usize>) -> LedgerResult<()> {
    print!("{}", format_activity_table(ledger.logs(), limit));

    let shown = limit.map_or(ledger.logs().len(), |l| l.min(ledger.logs().len()));
    if shown < ledger.logs().len() {
        println!("Showing {} of {} records", shown, ledger.logs().len());
    }
    Ok(())
}

pub fn handle_summary(ledger: &Ledger) -> LedgerResult<()> {
    let entries = ledger.entries();

    print!("{}", LedgerSummary::generate(entries).format_terminal());

    if entries.is_empty() {
        return Ok(());
    }

    println!();
    println!("分类统计");
    print!("{}", format_category_breakdown(&category_breakdown(entries)));
    println!();
    println!("每日汇总");
    print!("{}", format_daily_summaries(&daily_summaries(entries)));

    Ok(())
}
