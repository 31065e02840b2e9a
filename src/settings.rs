//! Runtime settings and API key resolution.
//!
//! Handles:
//! - `.env.local` / `.env` loading at startup
//! - API key lookup (env var, then OS keychain via keyring)
//! - Endpoint URL, request timeout and history location overrides

use crate::history::FileSlot;
use crate::llm::anthropic::DEFAULT_BASE_URL;
use crate::llm::prompts::MODEL;
use crate::llm::DEFAULT_TIMEOUT;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const API_URL_ENV: &str = "PHISHGUARD_API_URL";
pub const TIMEOUT_ENV: &str = "PHISHGUARD_TIMEOUT_SECS";
pub const HISTORY_PATH_ENV: &str = "PHISHGUARD_HISTORY_PATH";
pub const MODEL_ENV: &str = "PHISHGUARD_MODEL";

const KEYRING_SERVICE: &str = "phishguard";
const KEYRING_USER: &str = "anthropic";

/// Resolved configuration for one process.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub timeout: Duration,
    pub history_path: PathBuf,
}

impl Settings {
    /// Resolve settings from the environment (and keychain for the key).
    pub fn from_env() -> Self {
        let settings = Self::from_lookup(|key| std::env::var(key).ok(), keychain_api_key);
        log::info!(
            "[SETTINGS] api_url={} model={} timeout={}s history={} key={}",
            settings.api_url,
            settings.model,
            settings.timeout.as_secs(),
            settings.history_path.display(),
            if settings.api_key.is_some() { "set" } else { "missing" }
        );
        settings
    }

    /// Resolve settings from an arbitrary variable lookup.
    ///
    /// `keychain` is consulted only when the key variable is unset or empty.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        keychain: impl FnOnce() -> Option<String>,
    ) -> Self {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = non_empty(API_KEY_ENV).or_else(keychain);
        let api_url = non_empty(API_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let model = non_empty(MODEL_ENV).unwrap_or_else(|| MODEL.to_string());
        let timeout = match non_empty(TIMEOUT_ENV) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    log::warn!("[SETTINGS] Ignoring invalid {}={:?}", TIMEOUT_ENV, raw);
                    DEFAULT_TIMEOUT
                }
            },
            None => DEFAULT_TIMEOUT,
        };
        let history_path = non_empty(HISTORY_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(FileSlot::default_path);

        Self {
            api_key,
            api_url,
            model,
            timeout,
            history_path,
        }
    }
}

/// Load `.env.local`, falling back to `.env`, from `dir`.
///
/// Returns the file that was loaded, if any. Variables already in the
/// process environment win.
pub fn load_env_files(dir: &Path) -> Option<PathBuf> {
    for env_file in [".env.local", ".env"] {
        let path = dir.join(env_file);
        if path.exists() {
            match dotenvy::from_path(&path) {
                Ok(_) => log::info!("[STARTUP] Loaded {}", path.display()),
                Err(e) => log::warn!("[STARTUP] Failed to load {}: {}", path.display(), e),
            }
            return Some(path);
        }
    }
    None
}

/// Look the API key up in the OS keychain.
fn keychain_api_key() -> Option<String> {
    let key = read_secret(KEYRING_SERVICE, KEYRING_USER)?;
    log::info!("[SETTINGS] Loaded API key from OS keychain");
    Some(key)
}

/// Save an API key to the OS keychain.
pub fn save_api_key(api_key: &str) -> Result<(), String> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err("API key is empty".to_string());
    }
    store_secret(KEYRING_SERVICE, KEYRING_USER, api_key)?;
    log::info!("[SETTINGS] API key saved to OS keychain");
    Ok(())
}

fn read_secret(service: &str, user: &str) -> Option<String> {
    let entry = keyring::Entry::new(service, user).ok()?;
    match entry.get_password() {
        Ok(secret) if !secret.is_empty() => Some(secret),
        Ok(_) | Err(keyring::Error::NoEntry) => None,
        Err(e) => {
            log::warn!("[SETTINGS] Keychain lookup failed: {}", e);
            None
        }
    }
}

fn store_secret(service: &str, user: &str, secret: &str) -> Result<(), String> {
    let entry = keyring::Entry::new(service, user).map_err(|e| format!("Keyring error: {}", e))?;
    entry
        .set_password(secret)
        .map_err(|e| format!("Failed to save key: {}", e))
}
