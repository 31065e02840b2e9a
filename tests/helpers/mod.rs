//! Shared test helpers — a scripted completion backend.

#![allow(dead_code)]

use phishguard_lib::llm::{AnalysisError, CompletionBackend, CompletionRequest};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Backend that returns a fixed reply and records every request.
pub struct ScriptedBackend {
    reply: Result<String, AnalysisError>,
    delay: Duration,
    calls: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedBackend {
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_reply(Ok(text.into()))
    }

    pub fn failing(error: AnalysisError) -> Self {
        Self::with_reply(Err(error))
    }

    fn with_reply(reply: Result<String, AnalysisError>) -> Self {
        Self {
            reply,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Sleep this long before answering.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl CompletionBackend for ScriptedBackend {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.reply.clone()
    }
}

/// A well-formed six-field reply.
pub fn verdict_json(risk: u32, is_phishing: bool) -> String {
    serde_json::json!({
        "risk": risk,
        "type": "M-Pesa fake",
        "reasons": "Urgence artificielle et lien raccourci bit.ly",
        "advice_fr": "Ne cliquez pas sur le lien, appelez votre opérateur.",
        "advice_kirundi": "Ntukande kuri link, hamagara umukozi wa M-Pesa.",
        "isPhishing": is_phishing,
    })
    .to_string()
}

pub const MPESA_SMS: &str = "Votre compte M-Pesa sera suspendu, cliquez ici: bit.ly/xyz";
