//! Suggestion adapter
//!
//! Turns free-form text ("昨天请客户吃饭花了 1200") into candidate entries.
//! The adapter never touches the ledger; callers preview the candidates and
//! hand the accepted ones to `Ledger::add`.

pub mod chat;
pub mod task;

use async_trait::async_trait;

use crate::error::LedgerResult;
use crate::models::AiSuggestion;

pub use chat::{parse_suggestions, ChatCompletionsAdapter};
pub use task::SuggestionTask;

/// Source of candidate entries
#[async_trait]
pub trait SuggestionAdapter: Send + Sync {
    /// Propose entries for `input`
    ///
    /// `categories` lists the categories already in use so the adapter can
    /// reuse them instead of inventing near-duplicates.
    async fn suggest(&self, input: &str, categories: &[String]) -> LedgerResult<Vec<AiSuggestion>>;
}
