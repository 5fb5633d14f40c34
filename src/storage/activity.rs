//! Activity log blob codec
//!
//! The logs blob is a JSON array of `{id, timestamp, action, details}` with
//! ISO-8601 timestamps. Decoding is best effort per record: a record whose
//! timestamp (or any other field) cannot be reconstructed is dropped and the
//! rest survive. A blob that is not an array at all decodes to an error, and
//! loading maps that to an empty log.

use tracing::warn;

use crate::config::paths::LOGS_KEY;
use crate::error::{LedgerError, LedgerResult};
use crate::models::ActivityLog;

use super::blob::BlobStore;

/// Decode a logs blob, skipping records that fail to decode
pub fn decode_logs(blob: &str) -> LedgerResult<Vec<ActivityLog>> {
    let records: Vec<serde_json::Value> = serde_json::from_str(blob)
        .map_err(|e| LedgerError::Json(format!("Failed to parse logs blob: {}", e)))?;

    let total = records.len();
    let logs: Vec<ActivityLog> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(log) => Some(log),
            Err(e) => {
                warn!(index, error = %e, "dropping undecodable activity record");
                None
            }
        })
        .collect();

    if logs.len() < total {
        warn!(kept = logs.len(), total, "activity log partially restored");
    }

    Ok(logs)
}

pub fn encode_logs(logs: &[ActivityLog]) -> LedgerResult<String> {
    serde_json::to_string(logs)
        .map_err(|e| LedgerError::Json(format!("Failed to serialize logs: {}", e)))
}

/// Load the activity log, falling back to an empty log
pub fn load_logs(store: &dyn BlobStore) -> Vec<ActivityLog> {
    let blob = match store.read(LOGS_KEY) {
        Ok(Some(blob)) => blob,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(error = %e, "logs blob unreadable, starting with an empty log");
            return Vec::new();
        }
    };

    decode_logs(&blob).unwrap_or_else(|e| {
        warn!(error = %e, "logs blob corrupt, starting with an empty log");
        Vec::new()
    })
}
