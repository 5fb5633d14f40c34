//! Running balance recomputation
//!
//! Entries are ordered by their (year, month, day) key with a stable sort, so
//! same-day entries keep the relative order they had in the input. Balances
//! are then accumulated front to back. Only the very first sorted entry may
//! be an opening balance: its stored balance seeds the accumulator and its
//! income/expense are ignored. An opening-marker entry anywhere else is an
//! ordinary flow entry.

use crate::models::{LedgerEntry, Money};

/// Recompute running balances for a set of entries
///
/// Returns a new collection of the same length, sorted by date. The input is
/// left untouched.
pub fn recompute(entries: &[LedgerEntry]) -> Vec<LedgerEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by_key(|e| e.date());

    let mut balance = Money::zero();
    for (index, entry) in sorted.iter_mut().enumerate() {
        if index == 0 && entry.is_opening_balance() {
            balance = entry.balance;
            continue;
        }
        balance += entry.net();
        entry.balance = balance;
    }

    sorted
}
