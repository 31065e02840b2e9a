//! Live test for the ANALYZE pipeline against the real Anthropic API.
//!
//! Loads the API key from .env.local using dotenvy, same as the CLI.
//! Skipped (passes trivially) when no ANTHROPIC_API_KEY is available.

use phishguard_lib::llm::{AnalysisError, AnalysisService, AnthropicBackend};
use phishguard_lib::settings::{load_env_files, Settings};

fn load_env() -> Settings {
    let manifest_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    match load_env_files(manifest_dir) {
        Some(path) => eprintln!("[TEST] Loaded {}", path.display()),
        None => eprintln!("[TEST] No .env.local or .env in {}", manifest_dir.display()),
    }
    Settings::from_lookup(|key| std::env::var(key).ok(), || None)
}

#[tokio::test]
async fn test_live_mpesa_sms_is_flagged() {
    let settings = load_env();
    if settings.api_key.is_none() {
        eprintln!("SKIP: No ANTHROPIC_API_KEY");
        return;
    }

    let backend = AnthropicBackend::new(settings.api_key.clone(), settings.api_url.clone());
    let service = AnalysisService::new(backend)
        .with_timeout(settings.timeout)
        .with_model(settings.model.clone());

    let input = "Votre compte M-Pesa sera suspendu, cliquez ici: bit.ly/xyz";
    let start = std::time::Instant::now();
    let result = service.analyze(input).await.expect("live analysis");
    eprintln!("[TEST] Analyze returned in {}ms", start.elapsed().as_millis());
    eprintln!("[TEST] risk={} type={}", result.risk, result.threat_type);

    assert!(result.risk > 50, "expected a phishing score, got {}", result.risk);
    assert!(result.is_phishing);
    assert_eq!(result.original_input, input);
    assert!(!result.advice_kirundi.is_empty());
}

#[tokio::test]
async fn test_live_bad_key_is_upstream_failure() {
    let settings = load_env();
    if settings.api_key.is_none() {
        eprintln!("SKIP: No ANTHROPIC_API_KEY");
        return;
    }

    let backend = AnthropicBackend::new(Some("sk-ant-invalid".to_string()), settings.api_url);
    let err = AnalysisService::new(backend)
        .with_model(settings.model)
        .analyze("Bonjour")
        .await
        .unwrap_err();
    assert!(
        matches!(err, AnalysisError::UpstreamFailure { status: Some(401), .. }),
        "got {err:?}"
    );
}
