//! Plain-text rendering of results, history and failures for the CLI.

use crate::llm::{AnalysisError, AnalysisResult};
use chrono::{DateTime, Local};

const PREVIEW_CHARS: usize = 60;
const TIMESTAMP_FORMAT: &str = "%d %b %Y %H:%M";

/// Local date and time for an epoch-millisecond stamp.
pub fn format_timestamp(millis: i64) -> String {
    match DateTime::from_timestamp_millis(millis) {
        Some(utc) => utc.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string(),
        None => "date inconnue".to_string(),
    }
}

fn preview(text: &str) -> String {
    let flat: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > PREVIEW_CHARS {
        let cut: String = flat.chars().take(PREVIEW_CHARS).collect();
        format!("{}…", cut)
    } else {
        flat
    }
}

/// Alert headline (Kirundi, then French).
pub fn headline(result: &AnalysisResult) -> &'static str {
    if result.is_phishing {
        "🚨 ICO NI PHISHING! USIBAMYE! (Ceci est un phishing ! Ne cliquez pas !)"
    } else {
        "✅ Message sûr probable (risque faible)"
    }
}

/// Full result card.
pub fn render_result(result: &AnalysisResult) -> String {
    let level = result.risk_level();
    format!(
        "{headline}\n\
         Score de risque : {risk}% — {fr} / {rn}\n\
         Date            : {date}\n\
         Type de menace  : {kind}\n\
         Raisons         : {reasons}\n\
         Inama (Kirundi) : {advice_rn}\n\
         Conseil (FR)    : {advice_fr}\n\
         Message         : {input}",
        headline = headline(result),
        risk = result.risk,
        fr = level.label_fr(),
        rn = level.label_kirundi(),
        date = format_timestamp(result.timestamp),
        kind = result.threat_type,
        reasons = result.reasons,
        advice_rn = result.advice_kirundi,
        advice_fr = result.advice_fr,
        input = preview(&result.original_input),
    )
}

/// One line per entry, index first so `show <index>` can refer back.
pub fn render_history(entries: &[AnalysisResult]) -> String {
    if entries.is_empty() {
        return "Nta mateka. (Aucun historique.)".to_string();
    }
    entries
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "[{}] {} {:>3}% {:<24} {}",
                i,
                format_timestamp(r.timestamp),
                r.risk,
                r.threat_type,
                preview(&r.original_input)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// User-facing failure line: the class message, then the detail.
pub fn render_error(error: &AnalysisError) -> String {
    format!("{}\n  [{}] {}", error.user_message(), error.kind(), error)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOV_2023: i64 = 1_700_000_000_000;

    fn result(risk: u8, input: &str) -> AnalysisResult {
        AnalysisResult {
            risk,
            threat_type: "M-Pesa fake".to_string(),
            reasons: "Lien bit.ly".to_string(),
            advice_fr: "Ne cliquez pas.".to_string(),
            advice_kirundi: "Ntukande.".to_string(),
            is_phishing: risk > 50,
            original_input: input.to_string(),
            timestamp: NOV_2023,
        }
    }

    #[test]
    fn result_card_shows_both_languages() {
        let card = render_result(&result(92, "Votre compte M-Pesa sera suspendu"));
        assert!(card.contains("ICO NI PHISHING"));
        assert!(card.contains("92%"));
        assert!(card.contains("Ntukande."));
        assert!(card.contains("Ne cliquez pas."));
        assert!(card.contains("Risque critique"));
    }

    #[test]
    fn safe_result_headline() {
        assert!(headline(&result(10, "Bonjour")).contains("sûr"));
    }

    #[test]
    fn history_lines_are_indexed_and_previewed() {
        let long = "x".repeat(200);
        let out = render_history(&[result(92, "a"), result(5, &long)]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[0]"));
        assert!(lines[1].starts_with("[1]"));
        assert!(lines[1].ends_with('…'));
        assert!(lines[0].contains(&format_timestamp(NOV_2023)));
        assert!(lines[0].contains("2023"));
    }

    #[test]
    fn duplicate_entries_differ_by_time() {
        let first = result(92, "same");
        let mut second = first.clone();
        second.timestamp = NOV_2023 + 3 * 60 * 1000;
        let out = render_history(&[second, first]);
        let lines: Vec<&str> = out.lines().collect();
        assert_ne!(lines[0][3..], lines[1][3..]);
    }

    #[test]
    fn unrepresentable_timestamp_is_labelled() {
        assert_eq!(format_timestamp(i64::MAX), "date inconnue");
    }

    #[test]
    fn empty_history_message() {
        assert!(render_history(&[]).contains("Aucun historique"));
    }

    #[test]
    fn error_line_carries_kind() {
        let out = render_error(&AnalysisError::MalformedResponse("eof".into()));
        assert!(out.contains("[malformed_response]"));
        assert!(out.starts_with(AnalysisError::MalformedResponse(String::new()).user_message()));
    }
}
