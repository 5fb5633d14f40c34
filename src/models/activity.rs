//! Activity log model
//!
//! One record per user-initiated action. The log is kept newest-first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::LogId;

/// Action label for entries added through quick entry
pub const ACTION_QUICK_ADD: &str = "快速录入";
/// Action label for a confirmed deletion
pub const ACTION_DELETE: &str = "删除记录";
/// Action label for a report export
pub const ACTION_EXPORT: &str = "导出报表";
/// Action label for a backup archive written to disk
pub const ACTION_BACKUP: &str = "备份数据";
/// Action label for a restore from a backup file
pub const ACTION_RESTORE: &str = "恢复数据";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: LogId,
    pub timestamp: DateTime<Utc>,
    pub action: String,
    pub details: String,
}

impl ActivityLog {
    /// Create a record stamped with the current time
    pub fn new(action: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            id: LogId::generate(),
            timestamp: Utc::now(),
            action: action.into(),
            details: details.into(),
        }
    }

    /// Format the record for a single line of terminal output
    pub fn format_human_readable(&self) -> String {
        format!(
            "[{}] {}: {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.action,
            self.details
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_log_has_id_and_time() {
        let before = Utc::now();
        let log = ActivityLog::new(ACTION_QUICK_ADD, "成功添加了 2 条记录");
        assert!(!log.id.as_str().is_empty());
        assert!(log.timestamp >= before);
        assert_eq!(log.action, "快速录入");
    }

    #[test]
    fn test_timestamp_serialized_as_iso_string() {
        let json = r#"{"id":"k3j2h1g0f","timestamp":"2025-01-24T08:30:00.000Z","action":"导出报表","details":"导出了 8 条记录"}"#;
        let log: ActivityLog = serde_json::from_str(json).unwrap();
        assert_eq!(log.timestamp.to_rfc3339(), "2025-01-24T08:30:00+00:00");

        let value = serde_json::to_value(&log).unwrap();
        assert!(value["timestamp"].as_str().unwrap().starts_with("2025-01-24T08:30:00"));
    }

    #[test]
    fn test_human_readable_format() {
        let log = ActivityLog::new(ACTION_DELETE, "删除了摘要为: 午餐 的记录");
        let line = log.format_human_readable();
        assert!(line.contains("删除记录"));
        assert!(line.contains("午餐"));
    }
}
