//! Activity log display formatting

use chrono::Local;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::ActivityLog;

#[derive(Tabled)]
struct ActivityRow {
    #[tabled(rename = "时间")]
    time: String,
    #[tabled(rename = "操作")]
    action: String,
    #[tabled(rename = "详情")]
    details: String,
}

/// Format up to `limit` records, newest first, in local time
pub fn format_activity_table(logs: &[ActivityLog], limit: Option<usize>) -> String {
    if logs.is_empty() {
        return "No activity recorded.\n".to_string();
    }

    let rows = logs
        .iter()
        .take(limit.unwrap_or(logs.len()))
        .map(|log| ActivityRow {
            time: log
                .timestamp
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            action: log.action.clone(),
            details: log.details.clone(),
        });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_table_respects_limit() {
        let logs = vec![
            ActivityLog::new("删除记录", "newest"),
            ActivityLog::new("快速录入", "older"),
        ];

        let full = format_activity_table(&logs, None);
        assert!(full.contains("newest"));
        assert!(full.contains("older"));

        let limited = format_activity_table(&logs, Some(1));
        assert!(limited.contains("newest"));
        assert!(!limited.contains("older"));
    }

    #[test]
    fn test_empty_log() {
        assert_eq!(format_activity_table(&[], None), "No activity recorded.\n");
    }
}
