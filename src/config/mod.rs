//! Configuration system (layered: code > env).

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

/// Default model used for both the conversation loop and log analysis.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Global default config (lazy-initialized from env).
static DEFAULT_CONFIG: OnceLock<LiaisonConfig> = OnceLock::new();

/// Layered configuration for liaison.
///
/// Values set through the setters take precedence over anything loaded from
/// the environment. `from_env` reads a `.env` file when one is present.
#[derive(Clone, Debug, Default)]
pub struct LiaisonConfig {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl LiaisonConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from environment variables.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let config = Self::new();

        let env_keys = [
            "ANTHROPIC_API_KEY",
            "ANTHROPIC_BASE_URL",
            "LIAISON_MODEL",
            "GITHUB_TOKEN",
            "GITHUB_OWNER",
            "GITHUB_REPO",
            "GITHUB_BASE_URL",
            "TELEGRAM_BOT_TOKEN",
            "TELEGRAM_BASE_URL",
        ];

        for key in &env_keys {
            if let Ok(value) = std::env::var(key) {
                config.set(key, value);
            }
        }

        config
    }

    /// Get (or create) the global default config.
    pub fn global() -> &'static LiaisonConfig {
        DEFAULT_CONFIG.get_or_init(Self::from_env)
    }

    pub fn set(&self, key: &str, value: String) {
        self.values
            .write()
            .unwrap()
            .insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.read().unwrap().get(key).cloned()
    }

    /// Anthropic API key, required for any model call.
    pub fn anthropic_api_key(&self) -> Option<String> {
        self.get("ANTHROPIC_API_KEY")
    }

    pub fn anthropic_base_url(&self) -> Option<String> {
        self.get("ANTHROPIC_BASE_URL")
    }

    /// Model identifier, falling back to [`DEFAULT_MODEL`].
    pub fn model(&self) -> String {
        self.get("LIAISON_MODEL")
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    pub fn github_token(&self) -> Option<String> {
        self.get("GITHUB_TOKEN")
    }

    /// `owner/repo` pair the hosting client operates on.
    pub fn github_repo(&self) -> Option<(String, String)> {
        Some((self.get("GITHUB_OWNER")?, self.get("GITHUB_REPO")?))
    }

    pub fn telegram_bot_token(&self) -> Option<String> {
        self.get("TELEGRAM_BOT_TOKEN")
    }
}
