//! Report display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::reports::{CategoryTotal, DailySummary};

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "分类")]
    category: String,
    #[tabled(rename = "收入")]
    income: String,
    #[tabled(rename = "支出")]
    expense: String,
    #[tabled(rename = "笔数")]
    count: usize,
}

#[derive(Tabled)]
struct DailyRow {
    #[tabled(rename = "日期")]
    date: String,
    #[tabled(rename = "收入")]
    income: String,
    #[tabled(rename = "支出")]
    expense: String,
    #[tabled(rename = "余额")]
    balance: String,
}

pub fn format_category_breakdown(rows: &[CategoryTotal]) -> String {
    let rows = rows.iter().map(|r| CategoryRow {
        category: if r.category.is_empty() {
            "(未分类)".to_string()
        } else {
            r.category.clone()
        },
        income: r.income.to_string(),
        expense: r.expense.to_string(),
        count: r.entry_count,
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()));
    format!("{}\n", table)
}

pub fn format_daily_summaries(days: &[DailySummary]) -> String {
    let rows = days.iter().map(|d| DailyRow {
        date: d.date.clone(),
        income: d.income.to_string(),
        expense: d.expense.to_string(),
        balance: d.balance.to_string(),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()));
    format!("{}\n", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::seed_entries;
    use crate::reports::{category_breakdown, daily_summaries};

    #[test]
    fn test_category_breakdown_table() {
        let table = format_category_breakdown(&category_breakdown(&seed_entries()));
        assert!(table.contains("人力成本"));
        assert!(table.contains("346317.19"));
    }

    #[test]
    fn test_daily_table() {
        let table = format_daily_summaries(&daily_summaries(&seed_entries()));
        assert!(table.contains("2025-1-24"));
        assert!(table.contains("328171.27"));
    }
}
