//! Entries blob codec
//!
//! The entries blob is a JSON array of ledger entries. Decoding is strict:
//! a blob that fails to parse as a whole is rejected, and loading maps that
//! rejection (or a missing blob) to the seed data set.

use tracing::warn;

use crate::config::paths::ENTRIES_KEY;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::seed::seed_entries;
use crate::models::LedgerEntry;

use super::blob::BlobStore;

/// Decode an entries blob
pub fn decode_entries(blob: &str) -> LedgerResult<Vec<LedgerEntry>> {
    serde_json::from_str(blob)
        .map_err(|e| LedgerError::Json(format!("Failed to parse entries blob: {}", e)))
}

/// Encode entries for storage
pub fn encode_entries(entries: &[LedgerEntry]) -> LedgerResult<String> {
    serde_json::to_string(entries)
        .map_err(|e| LedgerError::Json(format!("Failed to serialize entries: {}", e)))
}

/// Load entries, falling back to the seed set on missing or corrupt data
///
/// Entries are returned as stored; no recompute happens here.
pub fn load_entries(store: &dyn BlobStore) -> Vec<LedgerEntry> {
    let blob = match store.read(ENTRIES_KEY) {
        Ok(Some(blob)) => blob,
        Ok(None) => return seed_entries(),
        Err(e) => {
            warn!(error = %e, "entries blob unreadable, using seed data");
            return seed_entries();
        }
    };

    match decode_entries(&blob) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(error = %e, "entries blob corrupt, using seed data");
            seed_entries()
        }
    }
}
