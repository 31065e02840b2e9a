//! LLM domain — the phishing ANALYZE pipeline.
//!
//! Public API for the analysis half of PhishGuard.
//! External code should only use the items exported here.
//!
//!   - analyze.rs   — AnalysisService: input check, one call, validation
//!   - backend.rs   — CompletionBackend trait + the fixed request
//!   - anthropic.rs — Anthropic Messages API implementation
//!   - parsing.rs   — code-fence stripping + verdict validation
//!   - prompts.rs   — model constants, system prompt, output schema

mod analyze;
pub mod anthropic;
pub mod backend;
mod error;
pub mod parsing;
pub mod prompts;
pub mod types;

pub use analyze::{now_millis, AnalysisService, DEFAULT_TIMEOUT};
pub use anthropic::AnthropicBackend;
pub use backend::{CompletionBackend, CompletionRequest};
pub use error::AnalysisError;
pub use types::{AnalysisResult, RiskLevel, PHISHING_THRESHOLD};
