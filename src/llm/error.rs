//! Failure taxonomy for the ANALYZE pipeline.

use thiserror::Error;

/// Why an analysis produced no result.
///
/// Exactly one variant per failure class; the caller picks the message to
/// show from the variant, never from the inner text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("Input text is empty")]
    InvalidInput,

    #[error("Could not reach the completion backend: {0}")]
    TransportFailure(String),

    #[error("Completion backend returned {category}{}: {message}", fmt_status(.status))]
    UpstreamFailure {
        status: Option<u16>,
        category: String,
        message: String,
    },

    #[error("Model output was unusable: {0}")]
    MalformedResponse(String),
}

fn fmt_status(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}

impl AnalysisError {
    /// Category for an HTTP error status when the body carries none.
    pub fn category_for_status(status: u16) -> &'static str {
        match status {
            401 | 403 => "authentication_error",
            429 => "rate_limit_error",
            500..=599 => "api_error",
            _ => "http_error",
        }
    }

    /// Short stable identifier, used in logs and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::InvalidInput => "invalid_input",
            AnalysisError::TransportFailure(_) => "transport_failure",
            AnalysisError::UpstreamFailure { .. } => "upstream_failure",
            AnalysisError::MalformedResponse(_) => "malformed_response",
        }
    }

    /// Human-readable message (Kirundi, then French) for this failure class.
    pub fn user_message(&self) -> &'static str {
        match self {
            AnalysisError::InvalidInput => {
                "Andika ubutumwa bwo gusesengura. (Veuillez saisir un message à analyser.)"
            }
            AnalysisError::TransportFailure(_) => {
                "Ikibazo c'umuhora. (Impossible de joindre le service d'analyse. Vérifiez votre connexion.)"
            }
            AnalysisError::UpstreamFailure { .. } => {
                "Ikibazo mu gusesengura. (Le service d'IA a refusé la requête. Vérifiez votre clé Anthropic.)"
            }
            AnalysisError::MalformedResponse(_) => {
                "Inyishu y'IA ntikoreshwa. (La réponse de l'IA était inutilisable. Réessayez.)"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_categories() {
        assert_eq!(AnalysisError::category_for_status(401), "authentication_error");
        assert_eq!(AnalysisError::category_for_status(403), "authentication_error");
        assert_eq!(AnalysisError::category_for_status(429), "rate_limit_error");
        assert_eq!(AnalysisError::category_for_status(503), "api_error");
        assert_eq!(AnalysisError::category_for_status(404), "http_error");
    }

    #[test]
    fn each_class_has_a_distinct_message() {
        let errors = [
            AnalysisError::InvalidInput,
            AnalysisError::TransportFailure("x".into()),
            AnalysisError::UpstreamFailure {
                status: Some(401),
                category: "authentication_error".into(),
                message: "bad key".into(),
            },
            AnalysisError::MalformedResponse("x".into()),
        ];
        let mut messages: Vec<&str> = errors.iter().map(|e| e.user_message()).collect();
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), errors.len());
    }

    #[test]
    fn upstream_display_includes_status() {
        let e = AnalysisError::UpstreamFailure {
            status: Some(429),
            category: "rate_limit_error".into(),
            message: "slow down".into(),
        };
        assert_eq!(
            e.to_string(),
            "Completion backend returned rate_limit_error (429): slow down"
        );
    }
}
