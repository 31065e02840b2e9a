//! Reply parsing — code-fence stripping and strict verdict validation.
//!
//! Anything that leaves this module as `Ok` has all six fields present
//! with the right types, a risk in 0..=100 and non-empty strings.

use super::error::AnalysisError;
use super::types::{Verdict, MAX_RISK};
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

/// The reply exactly as it comes off the wire, before range checks.
#[derive(Debug, Deserialize)]
struct RawVerdict {
    risk: f64,
    #[serde(rename = "type")]
    threat_type: String,
    reasons: String,
    advice_fr: String,
    advice_kirundi: String,
    #[serde(rename = "isPhishing")]
    is_phishing: bool,
}

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)^\s*```[A-Za-z0-9_-]*[ \t]*(?:\r?\n)?(.*?)\s*```\s*$")
            .expect("fence regex is valid")
    })
}

/// Strip a Markdown code fence wrapped around the whole payload, if any.
pub fn strip_code_fences(text: &str) -> String {
    match fence_regex().captures(text) {
        Some(caps) => caps
            .get(1)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default(),
        None => text.trim().to_string(),
    }
}

/// Parse and validate the model's text payload.
///
/// The returned verdict carries the rounded, range-checked risk.
pub fn parse_verdict(text: &str) -> Result<Verdict, AnalysisError> {
    let json_str = strip_code_fences(text);
    let raw: RawVerdict = serde_json::from_str(&json_str).map_err(|e| {
        let snippet: String = text.chars().take(200).collect();
        log::warn!("[LLM] Failed to parse verdict: {} — raw: {}", e, snippet);
        AnalysisError::MalformedResponse(e.to_string())
    })?;

    let risk = validate_risk(raw.risk)?;

    for (field, value) in [
        ("type", &raw.threat_type),
        ("reasons", &raw.reasons),
        ("advice_fr", &raw.advice_fr),
        ("advice_kirundi", &raw.advice_kirundi),
    ] {
        if value.trim().is_empty() {
            return Err(AnalysisError::MalformedResponse(format!(
                "field `{}` is empty",
                field
            )));
        }
    }

    Ok(Verdict {
        risk,
        threat_type: raw.threat_type,
        reasons: raw.reasons,
        advice_fr: raw.advice_fr,
        advice_kirundi: raw.advice_kirundi,
        is_phishing: raw.is_phishing,
    })
}

fn validate_risk(risk: f64) -> Result<u8, AnalysisError> {
    if !risk.is_finite() || risk < 0.0 || risk > f64::from(MAX_RISK) {
        return Err(AnalysisError::MalformedResponse(format!(
            "risk {} is outside 0-{}",
            risk, MAX_RISK
        )));
    }
    Ok(risk.round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{"risk":92,"type":"M-Pesa fake","reasons":"Urgence, lien bit.ly","advice_fr":"Ne cliquez pas.","advice_kirundi":"Ntukande kuri link.","isPhishing":true}"#;

    #[test]
    fn strips_json_fence() {
        let fenced = format!("```json\n{}\n```", VALID);
        assert_eq!(strip_code_fences(&fenced), VALID);
        let bare_fence = format!("```\n{}\n```\n", VALID);
        assert_eq!(strip_code_fences(&bare_fence), VALID);
    }

    #[test]
    fn strips_single_line_fence() {
        let inline = format!("```json {}```", VALID);
        assert_eq!(strip_code_fences(&inline), VALID);
        let no_tag = format!("```{}```", VALID);
        assert_eq!(strip_code_fences(&no_tag), VALID);
        assert_eq!(parse_verdict(&inline).unwrap().risk, 92);
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(strip_code_fences(&format!("  {}  ", VALID)), VALID);
        assert_eq!(strip_code_fences("not json"), "not json");
    }

    #[test]
    fn parses_valid_payload() {
        let verdict = parse_verdict(VALID).unwrap();
        assert_eq!(verdict.risk, 92);
        assert_eq!(verdict.threat_type, "M-Pesa fake");
    }

    #[test]
    fn fractional_risk_is_rounded() {
        let payload = VALID.replace("\"risk\":92", "\"risk\":50.6");
        assert_eq!(parse_verdict(&payload).unwrap().risk, 51);
    }

    #[test]
    fn out_of_range_risk_is_malformed() {
        for bad in ["101", "-1", "250.5"] {
            let payload = VALID.replace("92", bad);
            assert!(matches!(
                parse_verdict(&payload),
                Err(AnalysisError::MalformedResponse(_))
            ));
        }
    }

    #[test]
    fn mistyped_field_is_malformed() {
        let payload = VALID.replace("\"risk\":92", "\"risk\":\"92\"");
        assert!(matches!(
            parse_verdict(&payload),
            Err(AnalysisError::MalformedResponse(_))
        ));
        let payload = VALID.replace("\"isPhishing\":true", "\"isPhishing\":\"yes\"");
        assert!(matches!(
            parse_verdict(&payload),
            Err(AnalysisError::MalformedResponse(_))
        ));
    }

    #[test]
    fn empty_string_field_is_malformed() {
        let payload = VALID.replace("\"reasons\":\"Urgence, lien bit.ly\"", "\"reasons\":\"  \"");
        match parse_verdict(&payload) {
            Err(AnalysisError::MalformedResponse(msg)) => assert!(msg.contains("reasons")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn prose_is_malformed() {
        assert!(matches!(
            parse_verdict("Voici mon analyse : c'est du phishing."),
            Err(AnalysisError::MalformedResponse(_))
        ));
    }
}
