//! Application configuration. AI credentials, checkout price, output paths.

use crate::domain::DomainError;
use serde::Deserialize;

/// Commitment fee in cents ($20.00).
pub const DEFAULT_PRICE_CENTS: u64 = 2000;

/// Simulated processor latency.
pub const DEFAULT_PAYMENT_DELAY_MS: u64 = 1500;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// JSON roster replacing the built-in peers. Read from MENTRA_ROSTER_PATH.
    #[serde(default)]
    pub roster_path: Option<String>,

    /// Directory for generated session briefs. Read from MENTRA_BRIEFS_DIR.
    #[serde(default)]
    pub briefs_dir: Option<String>,

    /// Checkout price in cents. Read from MENTRA_PRICE_CENTS.
    #[serde(default)]
    pub price_cents: Option<u64>,

    /// Simulated payment delay in ms. Read from MENTRA_PAYMENT_DELAY_MS.
    #[serde(default)]
    pub payment_delay_ms: Option<u64>,

    // ─────────────────────────────────────────────────────────────────────────
    // AI Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// AI API key (e.g., OpenAI). Read from MENTRA_AI_API_KEY.
    #[serde(default)]
    pub ai_api_key: Option<String>,

    /// AI API URL. Defaults to OpenAI. Read from MENTRA_AI_API_URL.
    #[serde(default)]
    pub ai_api_url: Option<String>,

    /// AI model name. Defaults to "gpt-4o-mini". Read from MENTRA_AI_MODEL.
    #[serde(default)]
    pub ai_model: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Notification Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// E-mail relay webhook. Unset means welcome letters are only logged.
    /// Read from MENTRA_NOTIFY_WEBHOOK_URL.
    #[serde(default)]
    pub notify_webhook_url: Option<String>,
}

impl AppConfig {
    /// Read `MENTRA_*` variables and the optional file named by `MENTRA_CONFIG`.
    ///
    /// A value that does not deserialize (e.g. `MENTRA_PRICE_CENTS=20.00`) fails the
    /// whole load rather than being dropped.
    pub fn load() -> Result<Self, DomainError> {
        dotenv::dotenv().ok();
        Self::from_sources(
            config::Environment::with_prefix("MENTRA"),
            std::env::var("MENTRA_CONFIG").ok(),
        )
    }

    fn from_sources(env: config::Environment, file: Option<String>) -> Result<Self, DomainError> {
        let mut c = config::Config::builder().add_source(env);
        if let Some(path) = file {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()
            .and_then(|built| built.try_deserialize())
            .map_err(|e| DomainError::Config(e.to_string()))
    }

    /// Reject settings the application cannot run with.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.price_cents == Some(0) {
            return Err(DomainError::Config("MENTRA_PRICE_CENTS must be positive".into()));
        }
        if let Some(path) = self.roster_path.as_deref() {
            if path.trim().is_empty() {
                return Err(DomainError::Config("MENTRA_ROSTER_PATH is empty".into()));
            }
        }
        Ok(())
    }

    /// Returns the briefs directory. Defaults to "./briefs".
    pub fn briefs_dir_or_default(&self) -> String {
        self.briefs_dir
            .clone()
            .unwrap_or_else(|| "./briefs".to_string())
    }

    /// Returns the checkout price in cents. Defaults to DEFAULT_PRICE_CENTS.
    pub fn price_cents_or_default(&self) -> u64 {
        self.price_cents.unwrap_or(DEFAULT_PRICE_CENTS)
    }

    /// Returns the simulated payment delay. Defaults to DEFAULT_PAYMENT_DELAY_MS.
    pub fn payment_delay_ms_or_default(&self) -> u64 {
        self.payment_delay_ms.unwrap_or(DEFAULT_PAYMENT_DELAY_MS)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // AI Configuration Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the AI API key if configured. Reads from config or MENTRA_AI_API_KEY env.
    pub fn ai_api_key(&self) -> Option<String> {
        self.ai_api_key
            .clone()
            .or_else(|| std::env::var("MENTRA_AI_API_KEY").ok())
            .filter(|k| !k.is_empty())
    }

    /// Returns the AI API URL. Defaults to OpenAI chat completions endpoint.
    pub fn ai_api_url_or_default(&self) -> String {
        self.ai_api_url
            .clone()
            .unwrap_or_else(|| "https://api.openai.com/v1/chat/completions".to_string())
    }

    /// Returns the AI model name. Defaults to "gpt-4o-mini".
    pub fn ai_model_or_default(&self) -> String {
        self.ai_model
            .clone()
            .unwrap_or_else(|| "gpt-4o-mini".to_string())
    }

    /// Returns true if AI is configured (API key present).
    pub fn is_ai_configured(&self) -> bool {
        self.ai_api_key().is_some()
    }

    /// Returns the notification webhook if one is set and non-empty.
    pub fn notify_webhook_url(&self) -> Option<String> {
        self.notify_webhook_url.clone().filter(|u| !u.is_empty())
    }
}
