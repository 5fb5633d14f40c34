//! Ledger summary report
//!
//! Headline figures for a set of entries: totals, net flow, opening and
//! closing balance.

use crate::ledger::recompute;
use crate::models::{LedgerEntry, Money};

/// Headline figures for a set of entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSummary {
    /// Sum of income over all entries
    pub total_income: Money,
    /// Sum of expense over all entries
    pub total_expense: Money,
    /// Income minus expense, opening entry excluded
    pub net_flow: Money,
    /// Carried-over balance, when the earliest entry is an opening entry
    pub opening_balance: Option<Money>,
    /// Balance after the last entry in date order
    pub closing_balance: Money,
    pub entry_count: usize,
}

impl LedgerSummary {
    /// Summarize entries; balances are recomputed, stored ones are ignored
    pub fn generate(entries: &[LedgerEntry]) -> Self {
        let ordered = recompute(entries);

        let opening = ordered.first().filter(|e| e.is_opening_balance());
        let skip = usize::from(opening.is_some());

        let total_income = ordered.iter().map(|e| e.income).sum();
        let total_expense = ordered.iter().map(|e| e.expense).sum();
        let net_flow = ordered.iter().skip(skip).map(|e| e.net()).sum();

        Self {
            total_income,
            total_expense,
            net_flow,
            opening_balance: opening.map(|e| e.balance),
            closing_balance: ordered.last().map(|e| e.balance).unwrap_or_default(),
            entry_count: ordered.len(),
        }
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("账目概览\n");
        output.push_str(&"=".repeat(40));
        output.push('\n');

        if let Some(opening) = self.opening_balance {
            output.push_str(&format!("{:<12} {:>20}\n", "期初余额", opening));
        }
        output.push_str(&format!("{:<12} {:>20}\n", "总收入", self.total_income));
        output.push_str(&format!("{:<12} {:>20}\n", "总支出", self.total_expense));
        output.push_str(&format!("{:<12} {:>20}\n", "净流入", self.net_flow));
        output.push_str(&"-".repeat(40));
        output.push('\n');
        output.push_str(&format!("{:<12} {:>20}\n", "当前余额", self.closing_balance));
        output.push_str(&format!("{:<12} {:>20}\n", "记录数", self.entry_count));

        output
    }
}
