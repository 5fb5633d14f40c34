//! lx-ledger - Personal bookkeeping ledger
//!
//! A single-user ledger of dated income and expense entries with a running
//! balance, an activity log of every mutation, spreadsheet report export,
//! full-ledger backups and natural-language entry through a chat-completions
//! API.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Entries, candidates, activity records, money and ids
//! - `ledger`: Balance engine, seed data and the `Ledger` state object
//! - `storage`: Keyed JSON blob storage
//! - `reports`: Summary, category and per-day figures
//! - `export`: Report export (XLS and CSV)
//! - `backup`: Backup archives and restore
//! - `ai`: Suggestion adapter
//! - `display`: Terminal tables
//! - `cli`: Command handlers for the `lx` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use lx_ledger::config::LedgerPaths;
//! use lx_ledger::storage::open_ledger;
//!
//! let paths = LedgerPaths::new()?;
//! let mut ledger = open_ledger(&paths)?;
//! println!("{} entries", ledger.entries().len());
//! ```

pub mod ai;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ledger;
pub mod models;
pub mod reports;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
pub use ledger::Ledger;

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT_TRACING: Once = Once::new();

/// Default log directive when `RUST_LOG` is unset
pub const DEFAULT_LOG_DIRECTIVE: &str = "lx_ledger=warn";

/// Install the stderr log subscriber; later calls are no-ops
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
