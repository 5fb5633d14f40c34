//! Ledger core
//!
//! The balance engine, the seed data set, and the `Ledger` state object that
//! applies Add, Delete, Import and Clear.

pub mod balance;
pub mod book;
pub mod seed;

pub use balance::recompute;
pub use book::{Confirm, DeleteOutcome, Ledger, Persister, DELETE_PROMPT};
pub use seed::seed_entries;
