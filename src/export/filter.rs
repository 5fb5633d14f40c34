//! Entry selection by date range and category

use crate::models::{EntryDate, LedgerEntry};

/// Inclusive date bounds plus an optional category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    pub from: Option<EntryDate>,
    pub to: Option<EntryDate>,
    pub category: Option<String>,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_date(mut self, date: EntryDate) -> Self {
        self.from = Some(date);
        self
    }

    pub fn to_date(mut self, date: EntryDate) -> Self {
        self.to = Some(date);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none() && self.category.is_none()
    }

    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        let date = entry.date();
        self.from.map_or(true, |from| date >= from)
            && self.to.map_or(true, |to| date <= to)
            && self
                .category
                .as_deref()
                .map_or(true, |c| entry.category == c)
    }

    /// Matching entries, order preserved
    pub fn apply(&self, entries: &[LedgerEntry]) -> Vec<LedgerEntry> {
        entries.iter().filter(|e| self.matches(e)).cloned().collect()
    }

    /// `from ~ to` label for report titles, `None` without date bounds
    pub fn range_label(&self) -> Option<String> {
        match (self.from, self.to) {
            (None, None) => None,
            (from, to) => Some(format!(
                "{} ~ {}",
                from.map(|d| d.to_string()).unwrap_or_default(),
                to.map(|d| d.to_string()).unwrap_or_default()
            )),
        }
    }
}
