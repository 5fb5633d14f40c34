//! Reports module for lx-ledger
//!
//! Headline figures, per-category totals and per-day summaries computed
//! from a set of entries.

pub mod breakdown;
pub mod summary;

pub use breakdown::{category_breakdown, daily_summaries, CategoryTotal, DailySummary};
pub use summary::LedgerSummary;
