//! Backup CLI commands
//!
//! Implements CLI commands for backup management and import.

use std::path::Path;

use clap::{Subcommand, ValueEnum};

use crate::backup::{BackupFormat, BackupManager, ImportDocument, RestoreManager};
use crate::config::{LedgerPaths, Settings};
use crate::error::LedgerResult;
use crate::ledger::Ledger;

/// Archive format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ArchiveFormat {
    Json,
    Yaml,
}

impl From<ArchiveFormat> for BackupFormat {
    fn from(format: ArchiveFormat) -> Self {
        match format {
            ArchiveFormat::Json => BackupFormat::Json,
            ArchiveFormat::Yaml => BackupFormat::Yaml,
        }
    }
}

/// Backup subcommands
#[derive(Subcommand, Debug)]
pub enum BackupCommands {
    /// Create a new backup
    Create {
        /// Archive format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ArchiveFormat,
    },

    /// List all available backups
    List {
        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Restore from a backup
    Restore {
        /// Backup filename or path (use 'latest' for most recent)
        backup: String,

        /// Skip the safety stop
        #[arg(short, long)]
        force: bool,
    },

    /// Delete backups beyond the retention count
    Prune {
        /// Skip the safety stop
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    ledger: &mut Ledger,
    paths: &LedgerPaths,
    settings: &Settings,
    cmd: BackupCommands,
) -> LedgerResult<()> {
    let manager = BackupManager::new(paths.backup_dir(), settings.backup_retention);

    match cmd {
        BackupCommands::Create { format } => {
            println!("Creating backup...");
            let backup_path = manager.create_backup(ledger, format.into())?;
            println!("Backup created: {}", file_name(&backup_path));
            println!("Location: {}", backup_path.display());
        }

        BackupCommands::List { verbose } => {
            let backups = manager.list_backups()?;

            if backups.is_empty() {
                println!("No backups found.");
                println!("Create one with: lx backup create");
                return Ok(());
            }

            println!("Available Backups");
            println!("=================");
            println!();

            for (i, backup) in backups.iter().enumerate() {
                let age = chrono::Utc::now().signed_duration_since(backup.created_at);

                if verbose {
                    println!(
                        "{}. {}\n   Created: {}\n   Size: {}\n   Age: {}\n",
                        i + 1,
                        backup.filename,
                        backup.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
                        format_size(backup.size_bytes),
                        format_duration(age),
                    );
                } else {
                    println!(
                        "  {}. {} ({} ago, {})",
                        i + 1,
                        backup.filename,
                        format_duration(age),
                        format_size(backup.size_bytes),
                    );
                }
            }

            println!();
            println!("Total: {} backup(s)", backups.len());
        }

        BackupCommands::Restore { backup, force } => {
            let backup_path = manager.resolve(&backup)?;
            let document = ImportDocument::read(&backup_path)?;

            println!("Backup Information");
            println!("==================");
            println!("File: {}", backup_path.display());
            if let Some(created_at) = document.created_at {
                println!("Created: {}", created_at.format("%Y-%m-%d %H:%M:%S UTC"));
            }
            println!(
                "Contents: {} entries, {} activity records",
                document.entries.len(),
                document.logs.len()
            );
            println!();

            if !force {
                println!("WARNING: This will overwrite ALL current data!");
                println!("To proceed, run again with --force flag:");
                println!("  lx backup restore {} --force", backup);
                return Ok(());
            }

            println!("Creating backup of current data before restore...");
            let pre_restore_backup = manager.create_backup(ledger, BackupFormat::Json)?;
            println!("Pre-restore backup saved: {}", file_name(&pre_restore_backup));
            println!();

            let result =
                RestoreManager::restore_document(ledger, document, &file_name(&backup_path));
            println!("Restore complete!");
            println!("{}", result.summary());
        }

        BackupCommands::Prune { force } => {
            let backups = manager.list_backups()?;
            let to_delete = backups.len().saturating_sub(settings.backup_retention);

            if to_delete == 0 {
                println!("No backups to prune.");
                println!(
                    "Keeping up to {} backups, you have {}.",
                    settings.backup_retention,
                    backups.len()
                );
                return Ok(());
            }

            println!("Prune Summary");
            println!("=============");
            println!("Retention: {} backups", settings.backup_retention);
            println!("Current backups: {}", backups.len());
            println!("To be deleted: {}", to_delete);
            println!();

            if !force {
                println!("To delete old backups, run again with --force flag:");
                println!("  lx backup prune --force");
                return Ok(());
            }

            let deleted = manager.enforce_retention()?;
            println!("Deleted {} backup(s).", deleted.len());
        }
    }

    Ok(())
}

/// Import a backup archive or a plain `{entries, logs}` document
pub fn handle_import(ledger: &mut Ledger, file: &Path, force: bool) -> LedgerResult<()> {
    let document = ImportDocument::read(file)?;

    println!(
        "{} contains {} entries and {} activity records.",
        file.display(),
        document.entries.len(),
        document.logs.len()
    );

    if !force {
        println!("WARNING: Import replaces ALL current entries and the activity log!");
        println!("To proceed, run again with --force flag:");
        println!("  lx import {} --force", file.display());
        return Ok(());
    }

    let result = RestoreManager::restore_document(ledger, document, &file_name(file));
    println!("Import complete!");
    println!("{}", result.summary());
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Format a duration in human-readable form
fn format_duration(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds();

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    format!("{}d", hours / 24)
}

/// Format a file size in human-readable form
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activity::ACTION_RESTORE;
    use crate::models::{AiSuggestion, EntryDate};
    use crate::storage::MemoryBlobStore;
    use tempfile::TempDir;

    fn setup() -> (TempDir, LedgerPaths, Settings, Ledger) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut settings = Settings::default();
        settings.backup_retention = 2;
        (temp_dir, paths, settings, Ledger::open(MemoryBlobStore::new()))
    }

    #[test]
    fn test_restore_requires_force() {
        let (_temp, paths, settings, mut ledger) = setup();
        let create = BackupCommands::Create {
            format: ArchiveFormat::Json,
        };
        handle_backup_command(&mut ledger, &paths, &settings, create).unwrap();
        ledger.add(vec![AiSuggestion::new(EntryDate::new(2025, 1, 2), "x")]);

        handle_backup_command(
            &mut ledger,
            &paths,
            &settings,
            BackupCommands::Restore { backup: "latest".to_string(), force: false },
        )
        .unwrap();
        assert_eq!(ledger.entries().len(), 9);

        handle_backup_command(
            &mut ledger,
            &paths,
            &settings,
            BackupCommands::Restore { backup: "latest".to_string(), force: true },
        )
        .unwrap();
        assert_eq!(ledger.entries().len(), 8);
        assert_eq!(ledger.logs()[0].action, ACTION_RESTORE);
    }

    #[test]
    fn test_prune_requires_force() {
        let (_temp, paths, settings, mut ledger) = setup();
        for _ in 0..4 {
            let create = BackupCommands::Create {
                format: ArchiveFormat::Json,
            };
            handle_backup_command(&mut ledger, &paths, &settings, create).unwrap();
            std::thread::sleep(std::time::Duration::from_millis(20));
        }
        let manager = BackupManager::new(paths.backup_dir(), settings.backup_retention);

        let prune = BackupCommands::Prune { force: false };
        handle_backup_command(&mut ledger, &paths, &settings, prune).unwrap();
        assert_eq!(manager.list_backups().unwrap().len(), 4);

        let prune = BackupCommands::Prune { force: true };
        handle_backup_command(&mut ledger, &paths, &settings, prune).unwrap();
        assert_eq!(manager.list_backups().unwrap().len(), 2);
    }

    #[test]
    fn test_import_requires_force() {
        let (temp, _paths, _settings, mut ledger) = setup();
        let file = temp.path().join("export.json");
        std::fs::write(&file, r#"{"entries": [], "logs": []}"#).unwrap();

        handle_import(&mut ledger, &file, false).unwrap();
        assert_eq!(ledger.entries().len(), 8);

        handle_import(&mut ledger, &file, true).unwrap();
        assert!(ledger.entries().is_empty());
        assert_eq!(ledger.logs().len(), 1);
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_duration(chrono::Duration::seconds(90)), "1m");
        assert_eq!(format_duration(chrono::Duration::hours(50)), "2d");
    }
}
