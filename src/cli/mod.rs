//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the ledger core.

pub mod ai;
pub mod backup;
pub mod entry;
pub mod export;
pub mod prompt;
pub mod report;

pub use ai::{handle_ai, AiArgs};
pub use backup::{handle_backup_command, handle_import, BackupCommands};
pub use entry::{
    handle_add, handle_categories, handle_clear, handle_delete, handle_list, AddArgs, DeleteArgs,
    ListArgs,
};
pub use export::{handle_export, ExportArgs};
pub use report::{handle_history, handle_summary};
