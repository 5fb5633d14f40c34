//! Ledger entry model
//!
//! A dated income/expense record with a category and a running balance.
//! Dates are kept as three loose integers, the way stored ledgers carry them;
//! nothing checks that the triple names a real calendar day.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::EntryId;
use super::money::Money;

/// Summary text that marks the carried-over opening balance
pub const OPENING_BALANCE_MARKER: &str = "接上月";

/// Composite (year, month, day) key used for ordering entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryDate {
    pub year: i32,
    pub month: i32,
    pub day: i32,
}

impl EntryDate {
    pub const fn new(year: i32, month: i32, day: i32) -> Self {
        Self { year, month, day }
    }
}

impl fmt::Display for EntryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{}-{}-{}", self.year, self.month, self.day))
    }
}

impl FromStr for EntryDate {
    type Err = String;

    /// Parse `Y-M-D` (`2025-1-9` or `2025-01-09`); `/` and `.` also separate
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(['-', '/', '.']).collect();
        if parts.len() != 3 {
            return Err(format!("Invalid date '{}', expected Y-M-D", s));
        }
        let field = |p: &str| {
            p.trim()
                .parse::<i32>()
                .map_err(|_| format!("Invalid date '{}', expected Y-M-D", s))
        };
        Ok(Self::new(field(parts[0])?, field(parts[1])?, field(parts[2])?))
    }
}

/// One dated financial record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: EntryId,
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub summary: String,
    pub category: String,
    pub income: Money,
    pub expense: Money,
    /// Running balance after this entry; derived except on the opening entry
    pub balance: Money,
}

impl LedgerEntry {
    /// Build an entry from a candidate with a fresh id and a zero balance
    pub fn from_suggestion(suggestion: AiSuggestion) -> Self {
        Self {
            id: EntryId::generate(),
            year: suggestion.year,
            month: suggestion.month,
            day: suggestion.day,
            summary: suggestion.summary,
            category: suggestion.category,
            income: suggestion.income,
            expense: suggestion.expense,
            balance: Money::zero(),
        }
    }

    pub fn date(&self) -> EntryDate {
        EntryDate::new(self.year, self.month, self.day)
    }

    pub fn is_opening_balance(&self) -> bool {
        self.summary == OPENING_BALANCE_MARKER
    }

    /// Income minus expense
    pub fn net(&self) -> Money {
        self.income - self.expense
    }
}

/// A candidate entry produced by the suggestion adapter or typed by the user
///
/// Carries no id and no balance; both are assigned when the store ingests it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiSuggestion {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub summary: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub income: Money,
    #[serde(default)]
    pub expense: Money,
}

impl AiSuggestion {
    pub fn new(date: EntryDate, summary: impl Into<String>) -> Self {
        Self {
            year: date.year,
            month: date.month,
            day: date.day,
            summary: summary.into(),
            category: String::new(),
            income: Money::zero(),
            expense: Money::zero(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_income(mut self, income: Money) -> Self {
        self.income = income;
        self
    }

    pub fn with_expense(mut self, expense: Money) -> Self {
        self.expense = expense;
        self
    }

    pub fn date(&self) -> EntryDate {
        EntryDate::new(self.year, self.month, self.day)
    }
}
