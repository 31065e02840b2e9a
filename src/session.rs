//! Session — the presentation-facing driver.
//!
//! Owns the history store and the currently displayed result, and
//! serializes analyses: while one `submit` is in flight, further submits
//! are ignored (not queued, not cancelling the first).

use crate::history::{HistorySlot, HistoryStore};
use crate::llm::{AnalysisError, AnalysisResult, AnalysisService, CompletionBackend};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

/// What one `submit` produced. Exactly one of the two is set.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub result: Option<AnalysisResult>,
    pub error: Option<AnalysisError>,
}

impl SubmitOutcome {
    fn from_result(outcome: Result<AnalysisResult, AnalysisError>) -> Self {
        match outcome {
            Ok(result) => Self {
                result: Some(result),
                error: None,
            },
            Err(error) => Self {
                result: None,
                error: Some(error),
            },
        }
    }
}

/// Clears the busy flag when the in-flight submit finishes or is dropped.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// One user session: analysis service, history and the current result.
pub struct Session<B, S> {
    service: AnalysisService<B>,
    history: Mutex<HistoryStore<S>>,
    current: Mutex<Option<AnalysisResult>>,
    busy: AtomicBool,
}

impl<B: CompletionBackend, S: HistorySlot> Session<B, S> {
    pub fn new(service: AnalysisService<B>, history: HistoryStore<S>) -> Self {
        Self {
            service,
            history: Mutex::new(history),
            current: Mutex::new(None),
            busy: AtomicBool::new(false),
        }
    }

    pub fn service(&self) -> &AnalysisService<B> {
        &self.service
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Analyze `text` and record a success in history.
    ///
    /// Returns `None` without doing anything if another submit is still
    /// in flight.
    pub async fn submit(&self, text: &str) -> Option<SubmitOutcome> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            log::info!("[SESSION] Analysis already in flight — ignoring submit");
            return None;
        }
        let _guard = BusyGuard(&self.busy);

        *self.current_lock() = None;
        let outcome = self.service.analyze(text).await;

        match &outcome {
            Ok(result) => {
                *self.current_lock() = Some(result.clone());
                self.history_lock().insert(result.clone());
            }
            Err(e) => log::warn!("[SESSION] Analysis failed ({}): {}", e.kind(), e),
        }
        Some(SubmitOutcome::from_result(outcome))
    }

    /// Show a history entry as the current result. No re-analysis.
    pub fn select(&self, index: usize) -> Option<AnalysisResult> {
        let selected = self.history_lock().select(index).cloned();
        if let Some(result) = &selected {
            *self.current_lock() = Some(result.clone());
        }
        selected
    }

    /// Clear all history, persisted blob included.
    pub fn clear(&self) {
        self.history_lock().clear();
    }

    /// Dismiss the currently displayed result.
    pub fn clear_current(&self) {
        *self.current_lock() = None;
    }

    pub fn current(&self) -> Option<AnalysisResult> {
        self.current_lock().clone()
    }

    pub fn history(&self) -> Vec<AnalysisResult> {
        self.history_lock().entries().to_vec()
    }

    fn history_lock(&self) -> MutexGuard<'_, HistoryStore<S>> {
        self.history.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn current_lock(&self) -> MutexGuard<'_, Option<AnalysisResult>> {
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}
