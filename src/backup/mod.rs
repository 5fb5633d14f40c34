//! Backup system for lx-ledger
//!
//! Full-ledger archives with count-based retention, and restore from an
//! archive or a plain `{entries, logs}` document.
//!
//! # Architecture
//!
//! - `BackupManager`: creates, lists and prunes archives
//! - `RestoreManager`: parses a document and imports it into the ledger
//!
//! # Backup Format
//!
//! Archives are JSON (or YAML) files named
//! `backup-YYYYMMDD-HHMMSS-mmm.json` with the following structure:
//! - `schema_version`: Version for migration support
//! - `created_at`: Timestamp when backup was created
//! - `app_version`: Version of the writing application
//! - `entries`: Ledger entries as stored
//! - `logs`: Activity log, newest first
//!
//! # Example
//!
//! ```rust,ignore
//! use lx_ledger::backup::{BackupFormat, BackupManager, RestoreManager};
//!
//! let manager = BackupManager::new(paths.backup_dir(), settings.backup_retention);
//! let backup_path = manager.create_backup(&mut ledger, BackupFormat::Json)?;
//! manager.enforce_retention()?;
//!
//! // Later, restore from backup
//! let result = RestoreManager::restore_from_file(&mut ledger, &backup_path)?;
//! println!("{}", result.summary());
//! ```

mod manager;
mod restore;

pub use manager::{BackupArchive, BackupFormat, BackupInfo, BackupManager, BACKUP_SCHEMA_VERSION};
pub use restore::{ImportDocument, RestoreManager, RestoreResult};
