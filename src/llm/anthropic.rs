//! Anthropic Messages API backend — non-streaming.
//!
//! One POST to `/v1/messages` per analysis. The six-field schema goes out
//! as a structured-output format so the reply's text block is bare JSON.

use super::backend::{CompletionBackend, CompletionRequest};
use super::error::AnalysisError;
use serde_json::Value;

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const STRUCTURED_OUTPUTS_BETA: &str = "structured-outputs-2025-11-13";

/// Anthropic Claude completion backend.
#[derive(Debug, Clone)]
pub struct AnthropicBackend {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl AnthropicBackend {
    pub fn new(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.filter(|k| !k.is_empty()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Use a preconfigured HTTP client (proxy settings, TLS roots, ...).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }
}

/// JSON body for a Messages API call.
pub fn build_request_body(request: &CompletionRequest) -> Value {
    serde_json::json!({
        "model": request.model,
        "max_tokens": request.max_tokens,
        "temperature": request.temperature,
        "system": request.system,
        "messages": [{"role": "user", "content": request.user_message}],
        "output_format": {
            "type": "json_schema",
            "schema": request.response_schema,
        }
    })
}

impl CompletionBackend for AnthropicBackend {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AnalysisError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            log::warn!("[LLM] No ANTHROPIC_API_KEY set — not calling the API");
            AnalysisError::UpstreamFailure {
                status: None,
                category: "authentication_error".to_string(),
                message: "No API key configured".to_string(),
            }
        })?;

        log::info!("[LLM] Provider: anthropic");
        log::info!("[LLM] Model: {}", request.model);
        let start = std::time::Instant::now();

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("anthropic-beta", STRUCTURED_OUTPUTS_BETA)
            .header("content-type", "application/json")
            .json(&build_request_body(request))
            .send()
            .await
            .map_err(|e| {
                log::error!("[LLM] HTTP request failed: {}", e);
                AnalysisError::TransportFailure(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            log::error!("[LLM] Failed to read response body: {}", e);
            AnalysisError::TransportFailure(e.to_string())
        })?;

        log::info!("[LLM] API latency: {}ms", start.elapsed().as_millis());

        if !status.is_success() {
            let snippet: String = body.chars().take(200).collect();
            log::error!("[LLM] API returned {}: {}", status, snippet);
            return Err(classify_error_body(status.as_u16(), &body));
        }

        let text = extract_text(&body)?;
        log_usage(&body);
        Ok(text)
    }
}

/// Turn an error status + body into an `UpstreamFailure`.
///
/// Anthropic error bodies look like
/// `{"type":"error","error":{"type":"rate_limit_error","message":"..."}}`;
/// the inner `type` is passed through as the category when present.
pub fn classify_error_body(status: u16, body: &str) -> AnalysisError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let error = parsed.as_ref().and_then(|v| v.get("error"));
    let category = error
        .and_then(|e| e.get("type"))
        .and_then(|t| t.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| AnalysisError::category_for_status(status).to_string());
    let message = error
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| body.chars().take(200).collect());
    AnalysisError::UpstreamFailure {
        status: Some(status),
        category,
        message,
    }
}

/// Extract the first text block from a Messages API response body.
pub fn extract_text(body: &str) -> Result<String, AnalysisError> {
    let parsed: Value = serde_json::from_str(body)
        .map_err(|e| AnalysisError::MalformedResponse(format!("Invalid response envelope: {}", e)))?;
    let content = parsed
        .get("content")
        .and_then(|c| c.as_array())
        .ok_or_else(|| AnalysisError::MalformedResponse("No content in response".to_string()))?;
    for block in content {
        if block.get("type").and_then(|t| t.as_str()) == Some("text") {
            if let Some(t) = block.get("text").and_then(|t| t.as_str()) {
                return Ok(t.to_string());
            }
        }
    }
    Err(AnalysisError::MalformedResponse("No text in response".to_string()))
}

fn log_usage(body: &str) {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        if let Some(usage) = json.get("usage") {
            log::info!("[LLM] Input tokens: {}", usage["input_tokens"].as_u64().unwrap_or(0));
            log::info!("[LLM] Output tokens: {}", usage["output_tokens"].as_u64().unwrap_or(0));
        }
    }
}
