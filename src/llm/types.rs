//! LLM response types — the raw verdict and the completed AnalysisResult.
//!
//! `Verdict` is the six-field object the model returns, after validation. `AnalysisResult` is what callers and the history store see:
//! the verdict plus the original input and a completion timestamp.

use serde::{Deserialize, Serialize};

/// Risk scores strictly above this are phishing.
pub const PHISHING_THRESHOLD: u8 = 50;

/// Highest valid risk score.
pub const MAX_RISK: u8 = 100;

/// The record produced by a successful analysis.
///
/// Field names on the wire match the JSON the frontend and the
/// persisted history have always used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub risk: u8,
    #[serde(rename = "type")]
    pub threat_type: String,
    pub reasons: String,
    pub advice_fr: String,
    pub advice_kirundi: String,
    #[serde(rename = "isPhishing")]
    pub is_phishing: bool,
    #[serde(rename = "originalInput")]
    pub original_input: String,
    /// Epoch milliseconds, stamped when the analysis completed.
    pub timestamp: i64,
}

/// A validated model reply, as built by `parsing::parse_verdict`: `risk`
/// is rounded and within 0..=MAX_RISK. `is_phishing` is the model's claim
/// and is never trusted; see `AnalysisResult::from_verdict`.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub risk: u8,
    pub threat_type: String,
    pub reasons: String,
    pub advice_fr: String,
    pub advice_kirundi: String,
    pub is_phishing: bool,
}

/// Coarse risk band used when rendering a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn from_risk(risk: u8) -> Self {
        match risk {
            80.. => RiskLevel::Critical,
            50..=79 => RiskLevel::High,
            20..=49 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    pub fn label_fr(self) -> &'static str {
        match self {
            RiskLevel::Critical => "Risque critique",
            RiskLevel::High => "Risque élevé",
            RiskLevel::Medium => "Risque moyen",
            RiskLevel::Low => "Risque faible",
        }
    }

    pub fn label_kirundi(self) -> &'static str {
        match self {
            RiskLevel::Critical => "Akaga gakomeye cane",
            RiskLevel::High => "Akaga gakomeye",
            RiskLevel::Medium => "Akaga kagereranye",
            RiskLevel::Low => "Akaga gatoyi",
        }
    }
}

/// The phishing flag is a function of the score, nothing else.
pub fn is_phishing_risk(risk: u8) -> bool {
    risk > PHISHING_THRESHOLD
}

impl AnalysisResult {
    /// Build the final record from a validated verdict.
    pub fn from_verdict(verdict: Verdict, original_input: &str, timestamp: i64) -> Self {
        let risk = verdict.risk;
        if verdict.is_phishing != is_phishing_risk(risk) {
            log::warn!(
                "[LLM] Model returned isPhishing={} for risk={} — overriding",
                verdict.is_phishing,
                risk
            );
        }
        Self {
            risk,
            threat_type: verdict.threat_type,
            reasons: verdict.reasons,
            advice_fr: verdict.advice_fr,
            advice_kirundi: verdict.advice_kirundi,
            is_phishing: is_phishing_risk(risk),
            original_input: original_input.to_string(),
            timestamp,
        }
    }

    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_risk(self.risk)
    }

    /// Re-derive `is_phishing` from `risk`. Used on records that did not
    /// come straight out of `from_verdict` (e.g. restored history).
    pub fn normalize(&mut self) {
        self.is_phishing = is_phishing_risk(self.risk);
    }

    pub fn risk_in_range(&self) -> bool {
        self.risk <= MAX_RISK
    }
}
