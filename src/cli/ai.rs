//! Natural-language entry command
//!
//! Sends free text to the suggestion adapter, previews the candidates and
//! adds them after confirmation. Ctrl-C while waiting cancels the request.

use std::sync::Arc;

use clap::Args;
use tracing::warn;

use crate::ai::{ChatCompletionsAdapter, SuggestionAdapter, SuggestionTask};
use crate::config::AiSettings;
use crate::display::format_suggestion_table;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::AiSuggestion;

use super::prompt::confirm_on_stdin;

#[derive(Args, Debug)]
pub struct AiArgs {
    /// What happened, in plain words
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,

    /// Add the suggestions without asking
    #[arg(short, long)]
    pub yes: bool,
}

/// Run one adapter request to completion on a fresh runtime
pub fn request_suggestions(
    adapter: Arc<dyn SuggestionAdapter>,
    input: &str,
    categories: Vec<String>,
) -> LedgerResult<Vec<AiSuggestion>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let task = SuggestionTask::spawn(adapter, input, categories);
        tokio::select! {
            result = task => result,
            _ = tokio::signal::ctrl_c() => {
                warn!("interrupted, cancelling suggestion request");
                Err(LedgerError::Cancelled)
            }
        }
    })
}

pub fn handle_ai(ledger: &mut Ledger, settings: &AiSettings, args: &AiArgs) -> LedgerResult<()> {
    let adapter = Arc::new(ChatCompletionsAdapter::from_settings(settings)?);
    apply_suggestions(ledger, adapter, args)
}

fn apply_suggestions(
    ledger: &mut Ledger,
    adapter: Arc<dyn SuggestionAdapter>,
    args: &AiArgs,
) -> LedgerResult<()> {
    let input = args.text.join(" ");
    println!("Asking for suggestions...");
    let suggestions = request_suggestions(adapter, &input, ledger.existing_categories())?;

    if suggestions.is_empty() {
        println!("No entries recognized.");
        return Ok(());
    }

    print!("{}", format_suggestion_table(&suggestions));

    let count = suggestions.len();
    if !args.yes && !confirm_on_stdin(&format!("Add these {} entries?", count)) {
        println!("Cancelled.");
        return Ok(());
    }

    ledger.add(suggestions);
    println!("Added {} entries.", count);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activity::ACTION_QUICK_ADD;
    use crate::models::{EntryDate, Money};
    use crate::storage::MemoryBlobStore;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingAdapter {
        seen: Mutex<Vec<String>>,
        reply: Vec<AiSuggestion>,
    }

    #[async_trait]
    impl SuggestionAdapter for RecordingAdapter {
        async fn suggest(
            &self,
            input: &str,
            categories: &[String],
        ) -> LedgerResult<Vec<AiSuggestion>> {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(input.to_string());
                seen.extend(categories.iter().cloned());
            }
            Ok(self.reply.clone())
        }
    }

    struct BrokenAdapter;

    #[async_trait]
    impl SuggestionAdapter for BrokenAdapter {
        async fn suggest(
            &self,
            _input: &str,
            _categories: &[String],
        ) -> LedgerResult<Vec<AiSuggestion>> {
            Err(LedgerError::Adapter("503".into()))
        }
    }

    fn args(text: &str) -> AiArgs {
        AiArgs {
            text: text.split(' ').map(String::from).collect(),
            yes: true,
        }
    }

    #[test]
    fn test_suggestions_are_added() {
        let adapter = Arc::new(RecordingAdapter {
            seen: Mutex::new(Vec::new()),
            reply: vec![AiSuggestion::new(EntryDate::new(2025, 1, 10), "打印纸")
                .with_category("办公设备")
                .with_expense(Money::from_cents(9_900))],
        });
        let mut ledger = Ledger::open(MemoryBlobStore::new());

        apply_suggestions(&mut ledger, adapter.clone(), &args("买 打印纸")).unwrap();

        assert_eq!(ledger.entries().len(), 9);
        assert_eq!(ledger.logs()[0].action, ACTION_QUICK_ADD);
        let seen = adapter.seen.lock().unwrap();
        assert_eq!(seen[0], "买 打印纸");
        assert!(seen.contains(&"经营收入".to_string()));
    }

    #[test]
    fn test_failed_request_leaves_ledger_untouched() {
        let mut ledger = Ledger::open(MemoryBlobStore::new());

        let err = apply_suggestions(&mut ledger, Arc::new(BrokenAdapter), &args("x")).unwrap_err();

        assert!(matches!(err, LedgerError::Adapter(_)));
        assert_eq!(ledger.entries().len(), 8);
        assert!(ledger.logs().is_empty());
    }

    #[test]
    fn test_empty_reply_adds_nothing() {
        let adapter = Arc::new(RecordingAdapter {
            seen: Mutex::new(Vec::new()),
            reply: Vec::new(),
        });
        let mut ledger = Ledger::open(MemoryBlobStore::new());

        apply_suggestions(&mut ledger, adapter, &args("nothing")).unwrap();

        assert!(ledger.logs().is_empty());
    }
}
