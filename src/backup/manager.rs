//! Backup manager for lx-ledger
//!
//! Writes the full ledger (entries and activity log) to timestamped
//! archives in the backup directory and prunes old ones by count.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::activity::ACTION_BACKUP;
use crate::models::{ActivityLog, LedgerEntry};
use crate::storage::write_atomic;

/// Current archive schema version
pub const BACKUP_SCHEMA_VERSION: u32 = 1;

/// Serialization format of an archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackupFormat {
    #[default]
    Json,
    Yaml,
}

impl BackupFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    /// Guess the format from a file extension, JSON unless it says YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Metadata about a backup
#[derive(Debug, Clone)]
pub struct BackupInfo {
    /// Backup filename
    pub filename: String,
    /// Full path to backup
    pub path: PathBuf,
    /// When the backup was created
    pub created_at: DateTime<Utc>,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Backup archive format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupArchive {
    /// Schema version for migration support
    pub schema_version: u32,
    /// When the backup was created
    pub created_at: DateTime<Utc>,
    /// Application version that wrote the archive
    pub app_version: String,
    pub entries: Vec<LedgerEntry>,
    pub logs: Vec<ActivityLog>,
}

impl BackupArchive {
    /// Snapshot the ledger's current state
    pub fn from_ledger(ledger: &Ledger, created_at: DateTime<Utc>) -> Self {
        Self {
            schema_version: BACKUP_SCHEMA_VERSION,
            created_at,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            entries: ledger.entries().to_vec(),
            logs: ledger.logs().to_vec(),
        }
    }

    pub fn render(&self, format: BackupFormat) -> LedgerResult<String> {
        match format {
            BackupFormat::Json => serde_json::to_string_pretty(self)
                .map_err(|e| LedgerError::Json(format!("Failed to serialize backup: {}", e))),
            BackupFormat::Yaml => serde_yaml::to_string(self)
                .map_err(|e| LedgerError::Export(format!("Failed to serialize backup: {}", e))),
        }
    }
}

/// Manages backup creation and retention
pub struct BackupManager {
    /// Path to backup directory
    backup_dir: PathBuf,
    /// Number of backups kept by `enforce_retention`
    retention: usize,
}

impl BackupManager {
    pub fn new(backup_dir: PathBuf, retention: usize) -> Self {
        Self {
            backup_dir,
            retention,
        }
    }

    /// Create a backup of the ledger and record it in the activity log
    ///
    /// The archive holds the state from before the backup record is
    /// appended. Returns the path to the created backup file.
    pub fn create_backup(
        &self,
        ledger: &mut Ledger,
        format: BackupFormat,
    ) -> LedgerResult<PathBuf> {
        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            LedgerError::Io(format!("Failed to create backup directory: {}", e))
        })?;

        let now = Utc::now();
        let filename = format!(
            "backup-{}-{:03}.{}",
            now.format("%Y%m%d-%H%M%S"),
            now.timestamp_subsec_millis(),
            format.extension()
        );
        let backup_path = self.backup_dir.join(&filename);

        let archive = BackupArchive::from_ledger(ledger, now);
        write_atomic(&backup_path, archive.render(format)?.as_bytes())?;

        ledger.log_action(
            ACTION_BACKUP,
            format!("备份了 {} 条记录到 {}", archive.entries.len(), filename),
        );
        info!(path = %backup_path.display(), "backup created");

        Ok(backup_path)
    }

    /// List all available backups, newest first
    pub fn list_backups(&self) -> LedgerResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir).map_err(|e| {
            LedgerError::Io(format!("Failed to read backup directory: {}", e))
        })? {
            let entry = entry.map_err(|e| {
                LedgerError::Io(format!("Failed to read directory entry: {}", e))
            })?;

            if let Some(info) = parse_backup_info(&entry.path()) {
                backups.push(info);
            }
        }

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(backups)
    }

    /// Delete backups beyond the retention count, oldest first
    pub fn enforce_retention(&self) -> LedgerResult<Vec<PathBuf>> {
        let mut deleted = Vec::new();

        for backup in self.list_backups()?.into_iter().skip(self.retention) {
            fs::remove_file(&backup.path).map_err(|e| {
                LedgerError::Io(format!("Failed to delete old backup: {}", e))
            })?;
            debug!(path = %backup.path.display(), "old backup deleted");
            deleted.push(backup.path);
        }

        Ok(deleted)
    }

    pub fn backup_dir(&self) -> &PathBuf {
        &self.backup_dir
    }

    /// Get the most recent backup
    pub fn get_latest_backup(&self) -> LedgerResult<Option<BackupInfo>> {
        Ok(self.list_backups()?.into_iter().next())
    }

    /// Resolve `latest`, a filename in the backup directory, or a path
    pub fn resolve(&self, backup: &str) -> LedgerResult<PathBuf> {
        if backup == "latest" {
            return self
                .get_latest_backup()?
                .map(|info| info.path)
                .ok_or_else(|| LedgerError::backup_not_found("latest"));
        }

        let in_dir = self.backup_dir.join(backup);
        if in_dir.is_file() {
            return Ok(in_dir);
        }

        let path = PathBuf::from(backup);
        if path.is_file() {
            return Ok(path);
        }

        Err(LedgerError::backup_not_found(backup))
    }
}

/// Parse backup info from a `backup-YYYYMMDD-HHMMSS-mmm.<ext>` file
fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();

    let stem = filename.strip_prefix("backup-")?;
    let date_part = [".json", ".yaml", ".yml"]
        .iter()
        .find_map(|ext| stem.strip_suffix(ext))?;
    let created_at = parse_backup_timestamp(date_part)?;

    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes,
    })
}

/// Parse a backup timestamp from the filename date part
fn parse_backup_timestamp(date_str: &str) -> Option<DateTime<Utc>> {
    // YYYYMMDD-HHMMSS or YYYYMMDD-HHMMSS-mmm
    let parts: Vec<&str> = date_str.split('-').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return None;
    }

    let date_part = parts[0];
    let time_part = parts[1];
    let millis: u32 = match parts.get(2) {
        Some(ms) => ms.parse().ok()?,
        None => 0,
    };

    if date_part.len() != 8 || time_part.len() != 6 {
        return None;
    }

    let year: i32 = date_part.get(0..4)?.parse().ok()?;
    let month: u32 = date_part.get(4..6)?.parse().ok()?;
    let day: u32 = date_part.get(6..8)?.parse().ok()?;
    let hour: u32 = time_part.get(0..2)?.parse().ok()?;
    let minute: u32 = time_part.get(2..4)?.parse().ok()?;
    let second: u32 = time_part.get(4..6)?.parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = chrono::NaiveTime::from_hms_milli_opt(hour, minute, second, millis)?;

    Some(DateTime::from_naive_utc_and_offset(date.and_time(time), Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBlobStore;
    use chrono::{Datelike, Timelike};
    use tempfile::TempDir;

    fn create_test_manager(retention: usize) -> (BackupManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let manager = BackupManager::new(temp_dir.path().join("backups"), retention);
        (manager, temp_dir)
    }

    fn ledger() -> Ledger {
        Ledger::open(MemoryBlobStore::new())
    }

    #[test]
    fn test_create_backup() {
        let (manager, _temp) = create_test_manager(3);
        let mut ledger = ledger();

        let backup_path = manager.create_backup(&mut ledger, BackupFormat::Json).unwrap();

        assert!(backup_path.exists());
        let name = backup_path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("backup-"));
        assert!(name.ends_with(".json"));

        assert_eq!(ledger.logs().len(), 1);
        assert_eq!(ledger.logs()[0].action, ACTION_BACKUP);
    }

    #[test]
    fn test_archive_holds_pre_backup_state() {
        let (manager, _temp) = create_test_manager(3);
        let mut ledger = ledger();

        let backup_path = manager.create_backup(&mut ledger, BackupFormat::Json).unwrap();
        let contents = fs::read_to_string(&backup_path).unwrap();
        let archive: BackupArchive = serde_json::from_str(&contents).unwrap();

        assert_eq!(archive.schema_version, BACKUP_SCHEMA_VERSION);
        assert_eq!(archive.app_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(archive.entries, ledger.entries());
        assert!(archive.logs.is_empty());
    }

    #[test]
    fn test_yaml_backup() {
        let (manager, _temp) = create_test_manager(3);
        let mut ledger = ledger();

        let backup_path = manager.create_backup(&mut ledger, BackupFormat::Yaml).unwrap();
        assert_eq!(BackupFormat::from_path(&backup_path), BackupFormat::Yaml);

        let contents = fs::read_to_string(&backup_path).unwrap();
        let archive: BackupArchive = serde_yaml::from_str(&contents).unwrap();
        assert_eq!(archive.entries.len(), 8);

        assert_eq!(manager.list_backups().unwrap().len(), 1);
    }

    #[test]
    fn test_list_backups() {
        let (manager, _temp) = create_test_manager(3);
        let mut ledger = ledger();

        manager.create_backup(&mut ledger, BackupFormat::Json).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(20));
        manager.create_backup(&mut ledger, BackupFormat::Json).unwrap();

        let backups = manager.list_backups().unwrap();
        assert_eq!(backups.len(), 2);
        assert!(backups[0].created_at >= backups[1].created_at);
    }

    #[test]
    fn test_unrelated_files_are_ignored() {
        let (manager, _temp) = create_test_manager(3);
        fs::create_dir_all(manager.backup_dir()).unwrap();
        fs::write(manager.backup_dir().join("notes.json"), "{}").unwrap();
        fs::write(manager.backup_dir().join("backup-garbage.json"), "{}").unwrap();

        assert!(manager.list_backups().unwrap().is_empty());
    }

    #[test]
    fn test_retention_policy() {
        let (manager, _temp) = create_test_manager(3);
        let mut ledger = ledger();

        for _ in 0..5 {
            manager.create_backup(&mut ledger, BackupFormat::Json).unwrap();
            std::thread::sleep(std::time::Duration::from_millis(20));
        }
        let newest = manager.get_latest_backup().unwrap().unwrap();

        let deleted = manager.enforce_retention().unwrap();
        assert_eq!(deleted.len(), 2);

        let remaining = manager.list_backups().unwrap();
        assert_eq!(remaining.len(), 3);
        assert_eq!(remaining[0].path, newest.path);
    }

    #[test]
    fn test_resolve() {
        let (manager, _temp) = create_test_manager(3);
        let mut ledger = ledger();

        assert!(manager.resolve("latest").unwrap_err().is_not_found());

        let path = manager.create_backup(&mut ledger, BackupFormat::Json).unwrap();
        let filename = path.file_name().unwrap().to_string_lossy().to_string();

        assert_eq!(manager.resolve("latest").unwrap(), path);
        assert_eq!(manager.resolve(&filename).unwrap(), path);
        assert_eq!(manager.resolve(&path.to_string_lossy()).unwrap(), path);
        assert!(manager.resolve("missing.json").unwrap_err().is_not_found());
    }

    #[test]
    fn test_parse_backup_timestamp() {
        let timestamp = parse_backup_timestamp("20251127-143022").unwrap();
        assert_eq!(timestamp.year(), 2025);
        assert_eq!(timestamp.month(), 11);
        assert_eq!(timestamp.day(), 27);

        let timestamp = parse_backup_timestamp("20251127-143022-456").unwrap();
        assert_eq!(timestamp.hour(), 14);
        assert_eq!(timestamp.timestamp_subsec_millis(), 456);

        assert!(parse_backup_timestamp("2025-11").is_none());
        assert!(parse_backup_timestamp("20251327-143022").is_none());
    }

    #[test]
    fn test_empty_backup_dir() {
        let (manager, _temp) = create_test_manager(3);
        assert!(manager.list_backups().unwrap().is_empty());
    }
}
