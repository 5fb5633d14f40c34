//! Core data models for lx-ledger
//!
//! Ledger entries, candidate entries, activity records and the value types
//! they are built from.

pub mod activity;
pub mod entry;
pub mod ids;
pub mod money;

pub use activity::ActivityLog;
pub use entry::{AiSuggestion, EntryDate, LedgerEntry, OPENING_BALANCE_MARKER};
pub use ids::{EntryId, LogId};
pub use money::Money;
