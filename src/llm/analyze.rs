//! ANALYZE pipeline — input check → one completion call → validated result.
//!
//! Stateless: the service never touches history. The caller decides what
//! to do with the result.

use super::backend::{CompletionBackend, CompletionRequest};
use super::error::AnalysisError;
use super::parsing;
use super::prompts::MODEL;
use super::types::AnalysisResult;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs analyses against a completion backend.
#[derive(Debug, Clone)]
pub struct AnalysisService<B> {
    backend: B,
    timeout: Duration,
    model: String,
}

impl<B: CompletionBackend> AnalysisService<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            timeout: DEFAULT_TIMEOUT,
            model: MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Analyze one piece of text.
    ///
    /// Blank input fails with `InvalidInput` before any call is made.
    /// Otherwise exactly one backend call is made; its reply is validated
    /// and `isPhishing` is re-derived from `risk`. `original_input` is the
    /// exact string passed in, untrimmed.
    pub async fn analyze(&self, input: &str) -> Result<AnalysisResult, AnalysisError> {
        if input.trim().is_empty() {
            log::warn!("[LLM] Empty input — not calling the backend");
            return Err(AnalysisError::InvalidInput);
        }

        log::info!("[LLM] Analyzing {} chars", input.chars().count());
        let request = CompletionRequest::for_input(input).with_model(self.model.as_str());

        let text = match tokio::time::timeout(self.timeout, self.backend.complete(&request)).await {
            Ok(reply) => reply?,
            Err(_) => {
                log::error!("[LLM] Backend did not answer within {:?}", self.timeout);
                return Err(AnalysisError::TransportFailure(format!(
                    "timed out after {}s",
                    self.timeout.as_secs_f64()
                )));
            }
        };

        let verdict = parsing::parse_verdict(&text)?;
        let result = AnalysisResult::from_verdict(verdict, input, now_millis());
        log::info!(
            "[LLM] Verdict: risk={} type={} phishing={}",
            result.risk,
            result.threat_type,
            result.is_phishing
        );
        Ok(result)
    }
}

/// Current time as epoch milliseconds.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
