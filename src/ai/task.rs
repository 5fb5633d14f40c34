//! Cancellable suggestion request
//!
//! The adapter call runs on a spawned tokio task. `SuggestionTask` is the
//! caller's handle: awaiting it yields the candidates, and dropping it
//! aborts the request so a caller that has gone away never receives a late
//! response.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::models::AiSuggestion;

use super::SuggestionAdapter;

pub struct SuggestionTask {
    handle: JoinHandle<LedgerResult<Vec<AiSuggestion>>>,
}

impl SuggestionTask {
    /// Start a request on the current tokio runtime
    pub fn spawn(
        adapter: Arc<dyn SuggestionAdapter>,
        input: impl Into<String>,
        categories: Vec<String>,
    ) -> Self {
        let input = input.into();
        let handle = tokio::spawn(async move { adapter.suggest(&input, &categories).await });
        Self { handle }
    }

    /// Abort the request; awaiting afterwards yields `Cancelled`
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Future for SuggestionTask {
    type Output = LedgerResult<Vec<AiSuggestion>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.handle).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(e)) if e.is_cancelled() => Poll::Ready(Err(LedgerError::Cancelled)),
            Poll::Ready(Err(e)) => Poll::Ready(Err(LedgerError::Adapter(format!(
                "Suggestion task failed: {}",
                e
            )))),
        }
    }
}

impl Drop for SuggestionTask {
    fn drop(&mut self) {
        if !self.handle.is_finished() {
            debug!("aborting pending suggestion request");
            self.handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryDate;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    struct FixedAdapter {
        delay: Duration,
        completed: Arc<AtomicBool>,
    }

    #[async_trait]
    impl SuggestionAdapter for FixedAdapter {
        async fn suggest(
            &self,
            input: &str,
            categories: &[String],
        ) -> LedgerResult<Vec<AiSuggestion>> {
            tokio::time::sleep(self.delay).await;
            self.completed.store(true, Ordering::SeqCst);
            let category = categories.first().cloned().unwrap_or_default();
            Ok(vec![AiSuggestion::new(EntryDate::new(2025, 1, 1), input).with_category(category)])
        }
    }

    struct FailingAdapter;

    #[async_trait]
    impl SuggestionAdapter for FailingAdapter {
        async fn suggest(
            &self,
            _input: &str,
            _categories: &[String],
        ) -> LedgerResult<Vec<AiSuggestion>> {
            Err(LedgerError::Adapter("offline".into()))
        }
    }

    fn adapter(delay_ms: u64) -> (Arc<FixedAdapter>, Arc<AtomicBool>) {
        let completed = Arc::new(AtomicBool::new(false));
        let adapter = Arc::new(FixedAdapter {
            delay: Duration::from_millis(delay_ms),
            completed: completed.clone(),
        });
        (adapter, completed)
    }

    #[tokio::test]
    async fn test_task_yields_suggestions() {
        let (adapter, completed) = adapter(0);
        let task = SuggestionTask::spawn(adapter, "午餐", vec!["餐饮".to_string()]);

        let suggestions = task.await.unwrap();

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].summary, "午餐");
        assert_eq!(suggestions[0].category, "餐饮");
        assert!(completed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_adapter_error_is_passed_through() {
        let task = SuggestionTask::spawn(Arc::new(FailingAdapter), "x", Vec::new());
        assert!(matches!(task.await, Err(LedgerError::Adapter(_))));
    }

    #[tokio::test]
    async fn test_cancel_yields_cancelled() {
        let (adapter, completed) = adapter(10_000);
        let task = SuggestionTask::spawn(adapter, "x", Vec::new());

        task.cancel();

        assert!(matches!(task.await, Err(LedgerError::Cancelled)));
        assert!(!completed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_drop_aborts_request() {
        let (adapter, completed) = adapter(50);
        let task = SuggestionTask::spawn(adapter, "x", Vec::new());

        drop(task);
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(!completed.load(Ordering::SeqCst));
    }
}
