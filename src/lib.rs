//! PhishGuard Burundi — phishing analysis core.
//!
//! Wires the analysis pipeline and the history store into a session.
//! No business logic lives here, only module declarations and the
//! production wiring.
//!
//! Split across:
//!   - llm/      — ANALYZE pipeline (prompt, backend call, validation)
//!   - history/  — bounded, persisted result history
//!   - session.rs  — single-flight driver used by the front end
//!   - settings.rs — env / keychain configuration
//!   - report.rs   — plain-text rendering

pub mod history;
pub mod llm;
pub mod report;
pub mod session;
pub mod settings;

use history::{FileSlot, HistoryStore};
use llm::{AnalysisService, AnthropicBackend};
use session::Session;
use settings::Settings;

/// The production session type.
pub type AppSession = Session<AnthropicBackend, FileSlot>;

/// Build a session from resolved settings: Anthropic backend, file-backed
/// history restored from disk.
pub fn open_session(settings: &Settings) -> AppSession {
    let backend = AnthropicBackend::new(settings.api_key.clone(), settings.api_url.clone());
    let service = AnalysisService::new(backend)
        .with_timeout(settings.timeout)
        .with_model(settings.model.clone());
    let history = HistoryStore::load(FileSlot::new(settings.history_path.clone()));
    Session::new(service, history)
}
