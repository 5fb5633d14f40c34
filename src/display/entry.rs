//! Ledger entry display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{AiSuggestion, LedgerEntry, Money};

/// Length of the id prefix shown in tables
pub const SHORT_ID_LEN: usize = 8;

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "日期")]
    date: String,
    #[tabled(rename = "分类")]
    category: String,
    #[tabled(rename = "摘要")]
    summary: String,
    #[tabled(rename = "收入")]
    income: String,
    #[tabled(rename = "支出")]
    expense: String,
    #[tabled(rename = "余额")]
    balance: String,
}

#[derive(Tabled)]
struct SuggestionRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "日期")]
    date: String,
    #[tabled(rename = "分类")]
    category: String,
    #[tabled(rename = "摘要")]
    summary: String,
    #[tabled(rename = "收入")]
    income: String,
    #[tabled(rename = "支出")]
    expense: String,
}

pub fn short_id(id: &str) -> String {
    id.chars().take(SHORT_ID_LEN).collect()
}

/// Empty cell for a zero amount
fn amount_cell(amount: Money) -> String {
    if amount.is_zero() {
        String::new()
    } else {
        amount.to_string()
    }
}

/// Format entries as a ledger table
pub fn format_entry_table(entries: &[LedgerEntry]) -> String {
    if entries.is_empty() {
        return "No entries found.\n".to_string();
    }

    let rows = entries.iter().map(|e| EntryRow {
        id: short_id(e.id.as_str()),
        date: e.date().to_string(),
        category: e.category.clone(),
        summary: e.summary.clone(),
        income: amount_cell(e.income),
        expense: amount_cell(e.expense),
        balance: e.balance.to_string(),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(4..)).with(Alignment::right()));
    format!("{}\n", table)
}

/// Format candidates for preview before they are added
pub fn format_suggestion_table(suggestions: &[AiSuggestion]) -> String {
    let rows = suggestions.iter().enumerate().map(|(i, s)| SuggestionRow {
        index: i + 1,
        date: s.date().to_string(),
        category: s.category.clone(),
        summary: s.summary.clone(),
        income: amount_cell(s.income),
        expense: amount_cell(s.expense),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(4..)).with(Alignment::right()));
    format!("{}\n", table)
}

/// Format a single entry for confirmation prompts
pub fn format_entry_details(entry: &LedgerEntry) -> String {
    let mut output = String::new();

    output.push_str(&format!("ID:   {}\n", entry.id));
    output.push_str(&format!("日期: {}\n", entry.date()));
    output.push_str(&format!("摘要: {}\n", entry.summary));
    if !entry.category.is_empty() {
        output.push_str(&format!("分类: {}\n", entry.category));
    }
    if !entry.income.is_zero() {
        output.push_str(&format!("收入: {}\n", entry.income));
    }
    if !entry.expense.is_zero() {
        output.push_str(&format!("支出: {}\n", entry.expense));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::seed_entries;
    use crate::models::EntryDate;

    #[test]
    fn test_entry_table() {
        let table = format_entry_table(&seed_entries());

        assert!(table.contains("摘要"));
        assert!(table.contains("张纯芳酒"));
        assert!(table.contains("801471.13"));
        assert!(table.contains("2025-1-24"));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_entry_table(&[]), "No entries found.\n");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("15"), "15");
    }

    #[test]
    fn test_suggestion_table() {
        let suggestion = AiSuggestion::new(EntryDate::new(2025, 2, 3), "打车")
            .with_category("交通")
            .with_expense(Money::from_cents(4_550));
        let table = format_suggestion_table(&[suggestion]);

        assert!(table.contains("打车"));
        assert!(table.contains("45.50"));
        assert!(table.contains("2025-2-3"));
    }

    #[test]
    fn test_entry_details_skips_zero_amounts() {
        let details = format_entry_details(&seed_entries()[2]);

        assert!(details.contains("张纯芳酒"));
        assert!(details.contains("支出: 11397.00"));
        assert!(!details.contains("收入"));
    }
}
