//! Display formatting for terminal output
//!
//! Tables for entries, candidates, the activity log and reports.

pub mod activity;
pub mod entry;
pub mod report;

pub use activity::format_activity_table;
pub use entry::{format_entry_details, format_entry_table, format_suggestion_table, short_id};
pub use report::{format_category_breakdown, format_daily_summaries};
