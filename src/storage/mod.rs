//! Storage layer for lx-ledger
//!
//! Two keyed text blobs hold the whole ledger: the entries array and the
//! activity log array. Writes are atomic per blob; the two blobs are written
//! independently of each other.

pub mod activity;
pub mod blob;
pub mod entries;
pub mod file_io;

pub use activity::{decode_logs, encode_logs, load_logs};
pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use entries::{decode_entries, encode_entries, load_entries};
pub use file_io::{read_text, write_atomic, write_json_atomic};

use crate::config::paths::{LedgerPaths, ENTRIES_KEY, LOGS_KEY};
use crate::error::LedgerResult;
use crate::ledger::{Ledger, Persister};
use crate::models::{ActivityLog, LedgerEntry};

/// Persists ledger state by rewriting both blobs
#[derive(Debug, Clone)]
pub struct BlobPersister<S> {
    store: S,
}

impl<S: BlobStore> BlobPersister<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: BlobStore> Persister for BlobPersister<S> {
    fn persist(&self, entries: &[LedgerEntry], logs: &[ActivityLog]) -> LedgerResult<()> {
        self.store.write(ENTRIES_KEY, &encode_entries(entries)?)?;
        self.store.write(LOGS_KEY, &encode_logs(logs)?)?;
        Ok(())
    }
}

/// Open the file-backed ledger under the given paths
pub fn open_ledger(paths: &LedgerPaths) -> LedgerResult<Ledger> {
    paths.ensure_directories()?;
    Ok(Ledger::open(FileBlobStore::new(paths.data_dir())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::seed::seed_entries;
    use crate::models::{AiSuggestion, EntryDate};
    use tempfile::TempDir;

    #[test]
    fn test_open_ledger_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let ledger = open_ledger(&paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert_eq!(ledger.entries(), seed_entries().as_slice());
    }

    #[test]
    fn test_file_ledger_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut ledger = open_ledger(&paths).unwrap();
        ledger.add(vec![AiSuggestion::new(EntryDate::new(2025, 1, 30), "月末")]);
        let entries = ledger.entries().to_vec();
        let logs = ledger.logs().to_vec();
        drop(ledger);

        assert!(paths.entries_file().exists());
        assert!(paths.logs_file().exists());

        let reopened = open_ledger(&paths).unwrap();
        assert_eq!(reopened.entries(), entries.as_slice());
        assert_eq!(reopened.logs(), logs.as_slice());
    }
}
