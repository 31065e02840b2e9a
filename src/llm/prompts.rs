//! LLM prompt constants and the structured-output schema.
//!
//! These are the contract between PhishGuard and the model. The field
//! list in `ANALYZE_SYSTEM_PROMPT` and `response_schema()` must stay in
//! sync with the reply DTO in `parsing`.

use serde_json::{json, Value};

/// Default model. Must accept the structured-outputs beta.
pub const MODEL: &str = "claude-sonnet-4-5";
pub const MAX_TOKENS: u32 = 512;
pub const TEMPERATURE: f64 = 0.1;

/// The six fields every reply must carry.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "risk",
    "type",
    "reasons",
    "advice_fr",
    "advice_kirundi",
    "isPhishing",
];

/// ANALYZE system prompt — persona plus strict JSON output contract.
pub const ANALYZE_SYSTEM_PROMPT: &str = r#"Tu es "PhishGuard Burundi", un expert anti-phishing spécialisé dans les menaces ciblant les utilisateurs burundais (faux SMS M-Pesa et Lumicash, e-mails urgents en français, usurpation de banques, d'opérateurs et d'administrations, liens non burundais ou raccourcis, etc.).

Ton objectif est d'analyser le texte soumis et de fournir un score de risque et des conseils de sécurité dans le format JSON *strictement* suivant :

{
  "risk": number, // Score de risque de phishing (entier 0-100). Au-dessus de 50 = Phishing
  "type": string, // Type de menace (ex: 'M-Pesa fake', 'Urgence fiscale', 'Lien suspect')
  "reasons": string, // Explication concise des éléments suspects détectés (urgences, fautes, liens, etc.)
  "advice_fr": string, // Conseil de sécurité spécifique en français (ex: "Ne cliquez pas, appelez votre banque.")
  "advice_kirundi": string, // Conseil de sécurité spécifique en kirundi (ex: "Ntukande kuri link, hamagara banki yawe")
  "isPhishing": boolean // Déduis de 'risk' : true si risk > 50.
}

Tu DOIS retourner le JSON uniquement. N'ajoute aucune autre explication ou texte avant ou après le JSON."#;

/// Builds the user message that carries the submitted text.
///
/// The input is embedded as-is; the model sees exactly what the user pasted.
pub fn build_analyze_message(input: &str) -> String {
    format!("Analyse ce message pour détecter le phishing : \"{input}\"")
}

/// JSON schema declaring the six required fields and their types.
pub fn response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "risk": { "type": "number" },
            "type": { "type": "string" },
            "reasons": { "type": "string" },
            "advice_fr": { "type": "string" },
            "advice_kirundi": { "type": "string" },
            "isPhishing": { "type": "boolean" }
        },
        "required": REQUIRED_FIELDS,
        "additionalProperties": false
    })
}
