//! Category and per-day breakdowns

use std::collections::HashMap;

use crate::ledger::recompute;
use crate::models::{LedgerEntry, Money};

/// Totals for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub income: Money,
    pub expense: Money,
    pub entry_count: usize,
}

/// Totals for one calendar day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySummary {
    /// `Y-M-D` label of the day
    pub date: String,
    pub income: Money,
    pub expense: Money,
    /// Running balance after the day's last entry
    pub balance: Money,
}

/// Income and expense per category, largest expense first
///
/// Entries with an empty category are grouped under the empty name.
pub fn category_breakdown(entries: &[LedgerEntry]) -> Vec<CategoryTotal> {
    let mut totals: HashMap<&str, CategoryTotal> = HashMap::new();

    for entry in entries {
        let total = totals
            .entry(entry.category.as_str())
            .or_insert_with(|| CategoryTotal {
                category: entry.category.clone(),
                income: Money::zero(),
                expense: Money::zero(),
                entry_count: 0,
            });
        total.income += entry.income;
        total.expense += entry.expense;
        total.entry_count += 1;
    }

    let mut rows: Vec<CategoryTotal> = totals.into_values().collect();
    rows.sort_by(|a, b| {
        b.expense
            .cmp(&a.expense)
            .then_with(|| a.category.cmp(&b.category))
    });
    rows
}

/// One summary per distinct date, in date order
pub fn daily_summaries(entries: &[LedgerEntry]) -> Vec<DailySummary> {
    let mut days: Vec<DailySummary> = Vec::new();
    let mut last_date = None;

    for entry in recompute(entries) {
        let date = entry.date();
        if last_date != Some(date) {
            last_date = Some(date);
            days.push(DailySummary {
                date: date.to_string(),
                income: Money::zero(),
                expense: Money::zero(),
                balance: entry.balance,
            });
        }
        if let Some(day) = days.last_mut() {
            day.income += entry.income;
            day.expense += entry.expense;
            day.balance = entry.balance;
        }
    }

    days
}
