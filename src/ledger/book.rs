//! Ledger application state
//!
//! `Ledger` owns the entry collection and the activity log. Every committed
//! mutation leaves the entries recomputed and then hands both collections to
//! the injected [`Persister`]. Persistence is fire-and-forget from the
//! ledger's point of view: a failed write is logged and kept for the caller
//! to inspect, but in-memory state is never rolled back.

use tracing::{debug, error, info};

use crate::error::{LedgerError, LedgerResult};
use crate::models::activity::{ACTION_DELETE, ACTION_QUICK_ADD};
use crate::models::{ActivityLog, AiSuggestion, EntryId, LedgerEntry};
use crate::storage::{load_entries, load_logs, BlobPersister, BlobStore};

use super::balance::recompute;
use super::seed::seed_entries;

/// Prompt shown by the deletion gate
pub const DELETE_PROMPT: &str = "确定要删除这条记录吗？";

/// Side effect run after every committed mutation
pub trait Persister {
    fn persist(&self, entries: &[LedgerEntry], logs: &[ActivityLog]) -> LedgerResult<()>;
}

impl<F> Persister for F
where
    F: Fn(&[LedgerEntry], &[ActivityLog]) -> LedgerResult<()>,
{
    fn persist(&self, entries: &[LedgerEntry], logs: &[ActivityLog]) -> LedgerResult<()> {
        self(entries, logs)
    }
}

/// Yes/no gate consulted before a deletion
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// What a delete request ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The gate said no; nothing changed
    Declined,
    /// The entry was removed
    Deleted(LedgerEntry),
    /// Confirmed, but no entry had that id; the attempt is still logged
    Missing,
}

pub struct Ledger {
    entries: Vec<LedgerEntry>,
    logs: Vec<ActivityLog>,
    persister: Box<dyn Persister>,
    persist_error: Option<LedgerError>,
}

impl Ledger {
    /// Create a ledger from already-loaded state
    pub fn new(
        entries: Vec<LedgerEntry>,
        logs: Vec<ActivityLog>,
        persister: impl Persister + 'static,
    ) -> Self {
        Self {
            entries,
            logs,
            persister: Box::new(persister),
            persist_error: None,
        }
    }

    /// Load state from a blob store and persist back into it
    ///
    /// Missing or corrupt entries fall back to the seed set, missing or
    /// corrupt logs to an empty log. Nothing is recomputed on load.
    pub fn open<S: BlobStore + 'static>(store: S) -> Self {
        let entries = load_entries(&store);
        let logs = load_logs(&store);
        debug!(entries = entries.len(), logs = logs.len(), "ledger loaded");
        Self::new(entries, logs, BlobPersister::new(store))
    }

    /// Entries in their current (recomputed) order
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Activity records, newest first
    pub fn logs(&self) -> &[ActivityLog] {
        &self.logs
    }

    pub fn find(&self, id: &EntryId) -> Option<&LedgerEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    /// Resolve a full id or a unique id prefix
    pub fn resolve_id(&self, identifier: &str) -> LedgerResult<EntryId> {
        if let Some(entry) = self.entries.iter().find(|e| e.id.as_str() == identifier) {
            return Ok(entry.id.clone());
        }

        let matches: Vec<&LedgerEntry> = self
            .entries
            .iter()
            .filter(|e| e.id.as_str().starts_with(identifier))
            .collect();

        match matches.as_slice() {
            [] => Err(LedgerError::entry_not_found(identifier)),
            [only] => Ok(only.id.clone()),
            many => Err(LedgerError::AmbiguousId {
                prefix: identifier.to_string(),
                count: many.len(),
            }),
        }
    }

    /// Distinct non-empty categories in first-appearance order
    pub fn existing_categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for entry in &self.entries {
            if !entry.category.is_empty() && !categories.contains(&entry.category) {
                categories.push(entry.category.clone());
            }
        }
        categories
    }

    /// Append candidates as new entries and recompute balances
    ///
    /// Returns the ids assigned to the new entries.
    pub fn add(&mut self, candidates: Vec<AiSuggestion>) -> Vec<EntryId> {
        let count = candidates.len();
        let new_entries: Vec<LedgerEntry> = candidates
            .into_iter()
            .map(LedgerEntry::from_suggestion)
            .collect();
        let ids = new_entries.iter().map(|e| e.id.clone()).collect();

        let mut combined = std::mem::take(&mut self.entries);
        combined.extend(new_entries);
        self.entries = recompute(&combined);

        self.push_log(ACTION_QUICK_ADD, format!("成功添加了 {} 条记录", count));
        info!(count, "entries added");
        self.persist();
        ids
    }

    /// Delete an entry after the gate confirms
    pub fn delete(&mut self, id: &EntryId, gate: &mut dyn Confirm) -> DeleteOutcome {
        let target = self.find(id).cloned();

        if !gate.confirm(DELETE_PROMPT) {
            debug!(id = %id, "deletion declined");
            return DeleteOutcome::Declined;
        }

        let remaining: Vec<LedgerEntry> =
            self.entries.iter().filter(|e| &e.id != id).cloned().collect();
        self.entries = recompute(&remaining);

        let summary = target.as_ref().map(|e| e.summary.as_str()).unwrap_or("");
        self.push_log(ACTION_DELETE, format!("删除了摘要为: {} 的记录", summary));
        info!(id = %id, found = target.is_some(), "entry deleted");
        self.persist();

        match target {
            Some(entry) => DeleteOutcome::Deleted(entry),
            None => DeleteOutcome::Missing,
        }
    }

    /// Replace entries and logs wholesale; no merge
    pub fn import(&mut self, entries: Vec<LedgerEntry>, logs: Vec<ActivityLog>) {
        self.entries = recompute(&entries);
        self.logs = logs;
        info!(
            entries = self.entries.len(),
            logs = self.logs.len(),
            "ledger replaced by import"
        );
        self.persist();
    }

    /// Reset entries to the seed set
    ///
    /// Unlike `delete`, this asks for no confirmation and writes no activity
    /// record, matching the behavior stored ledgers were produced under.
    /// Callers that want a gate or an audit trail add it themselves.
    pub fn clear(&mut self) {
        self.entries = seed_entries();
        info!("entries reset to seed data");
        self.persist();
    }

    /// Append an activity record and persist
    pub fn log_action(&mut self, action: impl Into<String>, details: impl Into<String>) {
        self.push_log(action, details);
        self.persist();
    }

    /// Take the most recent persistence failure, if any
    pub fn take_persist_error(&mut self) -> Option<LedgerError> {
        self.persist_error.take()
    }

    fn push_log(&mut self, action: impl Into<String>, details: impl Into<String>) {
        self.logs.insert(0, ActivityLog::new(action, details));
    }

    fn persist(&mut self) {
        if let Err(e) = self.persister.persist(&self.entries, &self.logs) {
            error!(error = %e, "failed to persist ledger state");
            self.persist_error = Some(e);
        }
    }
}
