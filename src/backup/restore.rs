//! Backup restoration for lx-ledger
//!
//! Reads a backup archive, or a plain `{entries, logs}` document, and
//! replaces the ledger's state with it. Parsing finishes before anything is
//! touched, so a bad file leaves the ledger as it was.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::activity::ACTION_RESTORE;
use crate::models::{ActivityLog, LedgerEntry};

use super::manager::BackupFormat;

/// A document that can be imported
///
/// Full archives carry schema and timestamp metadata; plain exports carry
/// only the two arrays. A missing `logs` array imports as an empty log.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportDocument {
    #[serde(default)]
    pub schema_version: Option<u32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    pub entries: Vec<LedgerEntry>,
    #[serde(default)]
    pub logs: Vec<ActivityLog>,
}

impl ImportDocument {
    /// Parse document text in the given format
    pub fn parse(contents: &str, format: BackupFormat) -> LedgerResult<Self> {
        match format {
            BackupFormat::Json => serde_json::from_str(contents)
                .map_err(|e| LedgerError::Import(format!("Failed to parse backup file: {}", e))),
            BackupFormat::Yaml => serde_yaml::from_str(contents)
                .map_err(|e| LedgerError::Import(format!("Failed to parse backup file: {}", e))),
        }
    }

    /// Read and parse a file, picking the format from its extension
    pub fn read(path: &Path) -> LedgerResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| LedgerError::Io(format!("Failed to read backup file: {}", e)))?;
        Self::parse(&contents, BackupFormat::from_path(path))
    }
}

/// Result of a restore operation
#[derive(Debug, Default)]
pub struct RestoreResult {
    /// Schema version of the restored archive, absent for plain exports
    pub schema_version: Option<u32>,
    /// Date the backup was created, when recorded
    pub backup_date: Option<DateTime<Utc>>,
    pub entries_restored: usize,
    pub logs_restored: usize,
}

impl RestoreResult {
    pub fn summary(&self) -> String {
        format!(
            "Restored {} entries and {} activity records",
            self.entries_restored, self.logs_restored
        )
    }
}

/// Handles restoring from backups
pub struct RestoreManager;

impl RestoreManager {
    /// Replace the ledger's state with a file's contents
    ///
    /// The imported log is followed by one record of the restore itself.
    pub fn restore_from_file(ledger: &mut Ledger, path: &Path) -> LedgerResult<RestoreResult> {
        let document = ImportDocument::read(path)?;
        let source = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::restore_document(ledger, document, &source))
    }

    /// Replace the ledger's state with a parsed document
    pub fn restore_document(
        ledger: &mut Ledger,
        document: ImportDocument,
        source: &str,
    ) -> RestoreResult {
        let result = RestoreResult {
            schema_version: document.schema_version,
            backup_date: document.created_at,
            entries_restored: document.entries.len(),
            logs_restored: document.logs.len(),
        };

        ledger.import(document.entries, document.logs);
        ledger.log_action(
            ACTION_RESTORE,
            format!("从 {} 恢复了 {} 条记录", source, result.entries_restored),
        );
        info!(source, entries = result.entries_restored, "ledger restored");

        result
    }
}
