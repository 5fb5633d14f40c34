//! Path management for lx-ledger
//!
//! ## Path Resolution Order
//!
//! 1. `LX_LEDGER_DATA_DIR` environment variable (if set)
//! 2. The platform data directory reported by `directories`
//!    (e.g. `~/.local/share/lx-ledger` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::LedgerError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "LX_LEDGER_DATA_DIR";

/// Storage key of the entries blob
pub const ENTRIES_KEY: &str = "lx_ledger_data_v1";

/// Storage key of the activity log blob
pub const LOGS_KEY: &str = "lx_ledger_logs_v1";

/// Manages all paths used by lx-ledger
#[derive(Debug, Clone)]
pub struct LedgerPaths {
    base_dir: PathBuf,
}

impl LedgerPaths {
    /// Resolve the base directory from the environment or platform defaults
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, LedgerError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            ProjectDirs::from("", "", "lx-ledger")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or_else(|| {
                    LedgerError::Config("Could not determine a data directory".into())
                })?
        };

        Ok(Self { base_dir })
    }

    /// Create LedgerPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the keyed blobs
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Default destination for exported reports
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// File backing a storage key
    pub fn blob_file(&self, key: &str) -> PathBuf {
        self.data_dir().join(format!("{}.json", key))
    }

    pub fn entries_file(&self) -> PathBuf {
        self.blob_file(ENTRIES_KEY)
    }

    pub fn logs_file(&self) -> PathBuf {
        self.blob_file(LOGS_KEY)
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), LedgerError> {
        for dir in [
            self.base_dir.clone(),
            self.data_dir(),
            self.backup_dir(),
            self.export_dir(),
        ] {
            std::fs::create_dir_all(&dir).map_err(|e| {
                LedgerError::Io(format!("Failed to create {}: {}", dir.display(), e))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.backup_dir(), temp_dir.path().join("backups"));
        assert_eq!(paths.export_dir(), temp_dir.path().join("exports"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(paths.backup_dir().exists());
        assert!(paths.export_dir().exists());
    }

    #[test]
    fn test_blob_files() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(
            paths.entries_file(),
            temp_dir.path().join("data").join("lx_ledger_data_v1.json")
        );
        assert_eq!(
            paths.logs_file(),
            temp_dir.path().join("data").join("lx_ledger_logs_v1.json")
        );
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
    }
}
