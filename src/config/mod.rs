//! Configuration module for lx-ledger
//!
//! This module provides configuration management including:
//! - data directory resolution
//! - user settings persistence

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::{AiSettings, ExportSettings, ReportFormat, Settings};
