//! Entry CLI commands
//!
//! List, add, delete and clear ledger entries.

use clap::Args;

use crate::display::{format_entry_details, format_entry_table};
use crate::error::LedgerResult;
use crate::export::EntryFilter;
use crate::ledger::{DeleteOutcome, Ledger};
use crate::models::{AiSuggestion, EntryDate, Money};

use super::prompt::confirm_on_stdin;

/// Parse an amount argument such as `1200`, `35.5` or `¥1,200.00`
pub fn parse_money_arg(s: &str) -> Result<Money, String> {
    Money::parse(s).map_err(|e| e.to_string())
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// First date to include (Y-M-D)
    #[arg(long)]
    pub from: Option<EntryDate>,

    /// Last date to include (Y-M-D)
    #[arg(long)]
    pub to: Option<EntryDate>,

    /// Only entries in this category
    #[arg(short, long)]
    pub category: Option<String>,
}

impl ListArgs {
    pub fn filter(&self) -> EntryFilter {
        EntryFilter {
            from: self.from,
            to: self.to,
            category: self.category.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Entry date (Y-M-D)
    #[arg(short, long)]
    pub date: EntryDate,

    /// Summary text
    #[arg(short, long)]
    pub summary: String,

    /// Category name
    #[arg(short, long, default_value = "")]
    pub category: String,

    /// Income amount
    #[arg(short, long, value_parser = parse_money_arg)]
    pub income: Option<Money>,

    /// Expense amount
    #[arg(short, long, value_parser = parse_money_arg)]
    pub expense: Option<Money>,
}

impl AddArgs {
    pub fn into_suggestion(self) -> AiSuggestion {
        AiSuggestion::new(self.date, self.summary)
            .with_category(self.category)
            .with_income(self.income.unwrap_or_default())
            .with_expense(self.expense.unwrap_or_default())
    }
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Entry ID or a unique prefix of it
    pub id: String,

    /// Answer yes to the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

pub fn handle_list(ledger: &Ledger, args: &ListArgs) -> LedgerResult<()> {
    let filter = args.filter();
    let entries = filter.apply(ledger.entries());

    print!("{}", format_entry_table(&entries));
    if filter.is_empty() {
        println!("{} entries", entries.len());
    } else {
        println!("{} of {} entries", entries.len(), ledger.entries().len());
    }

    Ok(())
}

pub fn handle_add(ledger: &mut Ledger, args: AddArgs) -> LedgerResult<()> {
    let ids = ledger.add(vec![args.into_suggestion()]);
    for id in &ids {
        println!("Added entry {}", id);
    }
    Ok(())
}

pub fn handle_delete(ledger: &mut Ledger, args: &DeleteArgs) -> LedgerResult<()> {
    let id = ledger.resolve_id(&args.id)?;

    if let Some(entry) = ledger.find(&id) {
        print!("{}", format_entry_details(entry));
    }

    let outcome = if args.yes {
        ledger.delete(&id, &mut |_: &str| true)
    } else {
        ledger.delete(&id, &mut confirm_on_stdin)
    };

    match outcome {
        DeleteOutcome::Declined => println!("Cancelled."),
        DeleteOutcome::Deleted(entry) => println!("Deleted entry: {}", entry.summary),
        DeleteOutcome::Missing => println!("No entry with ID {}", id),
    }

    Ok(())
}

pub fn handle_categories(ledger: &Ledger) -> LedgerResult<()> {
    let categories = ledger.existing_categories();
    if categories.is_empty() {
        println!("No categories in use.");
        return Ok(());
    }

    for category in categories {
        println!("{}", category);
    }
    Ok(())
}

pub fn handle_clear(ledger: &mut Ledger, force: bool) -> LedgerResult<()> {
    if !force {
        println!("WARNING: This will replace ALL entries with the initial sample data!");
        println!("The activity log is kept. To proceed, run again with --force flag:");
        println!("  lx clear --force");
        return Ok(());
    }

    ledger.clear();
    println!("Ledger reset to {} sample entries.", ledger.entries().len());
    Ok(())
}
