//! Completion backend trait — the one seam between ANALYZE and the network.
//!
//! `AnthropicBackend` is the production implementation. Tests plug in
//! their own backends to script replies without touching the network.

use super::error::AnalysisError;
use super::prompts::{self, MAX_TOKENS, MODEL, TEMPERATURE};
use serde_json::Value;
use std::future::Future;

/// Everything a backend needs to issue one completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub user_message: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub response_schema: Value,
}

impl CompletionRequest {
    /// The fixed ANALYZE request for one piece of input text.
    pub fn for_input(input: &str) -> Self {
        Self {
            model: MODEL.to_string(),
            system: prompts::ANALYZE_SYSTEM_PROMPT.to_string(),
            user_message: prompts::build_analyze_message(input),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            response_schema: prompts::response_schema(),
        }
    }

    /// Swap the model id, leaving every other parameter fixed.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// A completion endpoint that turns one request into one text payload.
///
/// Implementations make exactly one upstream call per `complete` and
/// never retry. Errors are already classified into `AnalysisError`.
pub trait CompletionBackend {
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<String, AnalysisError>> + Send;
}
