//! User settings for lx-ledger
//!
//! Manages the suggestion adapter endpoint, report export preferences and
//! backup retention.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::storage::write_json_atomic;

/// Report format preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// HTML table that spreadsheet applications open as a workbook
    #[default]
    Xls,
    /// Plain comma-separated values
    Csv,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Xls => "xls",
            Self::Csv => "csv",
        }
    }
}

/// Settings for the chat-completions suggestion adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiSettings {
    /// Base URL of an OpenAI-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model name sent with each request
    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AiSettings {
    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Result<String, LedgerError> {
        std::env::var(&self.api_key_env).map_err(|_| {
            LedgerError::Config(format!(
                "Environment variable {} is not set",
                self.api_key_env
            ))
        })
    }
}

/// Report export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Title row of exported reports
    #[serde(default = "default_report_title")]
    pub title: String,

    #[serde(default)]
    pub default_format: ReportFormat,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            title: default_report_title(),
            default_format: ReportFormat::default(),
        }
    }
}

/// User settings for lx-ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub ai: AiSettings,

    #[serde(default)]
    pub export: ExportSettings,

    /// Number of backups kept by `backup prune`
    #[serde(default = "default_backup_retention")]
    pub backup_retention: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_base_url() -> String {
    "https://api.deepseek.com".to_string()
}

fn default_model() -> String {
    "deepseek-chat".to_string()
}

fn default_api_key_env() -> String {
    "DEEPSEEK_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_report_title() -> String {
    "财务明细报表".to_string()
}

fn default_backup_retention() -> usize {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            ai: AiSettings::default(),
            export: ExportSettings::default(),
            backup_retention: default_backup_retention(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                LedgerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}
