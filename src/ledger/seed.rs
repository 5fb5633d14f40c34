//! Seed data set
//!
//! The ledger a fresh installation starts with, and what Clear and a corrupt
//! entries blob fall back to. Entries are listed in their stored order, which
//! is not date order, and their balances are kept exactly as stored.

use crate::models::{EntryId, LedgerEntry, Money};

/// (id, day, summary, category, income, expense, balance), amounts in cents
const SEED: [(&str, i32, &str, &str, i64, i64, i64); 8] = [
    ("1", 1, "接上月", "期初余额", 0, 0, 7_172_433),
    ("2", 6, "刘禹成7月份工资、社保及公积金", "人力成本", 0, 1_645_919, 5_526_514),
    ("3", 9, "张纯芳酒", "商务招待", 0, 1_139_700, 4_386_814),
    ("4", 9, "收到刘群英12月份工资", "经营收入", 1_040_000, 0, 5_426_814),
    ("5", 8, "房租定金退回", "经营收入", 300_000, 0, 5_726_814),
    ("6", 13, "刘北南购手机", "办公设备", 0, 2_228_000, 3_498_814),
    ("15", 17, "业务员提成（多名员工）", "人力成本", 0, 32_985_800, -4_379_100),
    ("17", 24, "收到雅图2024管理费（多项目）", "经营收入", 62_304_113, 0, 80_147_113),
];

/// Build the eight seed entries (January 2025)
pub fn seed_entries() -> Vec<LedgerEntry> {
    SEED.iter()
        .map(
            |&(id, day, summary, category, income, expense, balance)| LedgerEntry {
                id: EntryId::from(id),
                year: 2025,
                month: 1,
                day,
                summary: summary.to_string(),
                category: category.to_string(),
                income: Money::from_cents(income),
                expense: Money::from_cents(expense),
                balance: Money::from_cents(balance),
            },
        )
        .collect()
}
