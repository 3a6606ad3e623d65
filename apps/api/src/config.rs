use std::time::Duration;

use anyhow::{Context, Result};

use crate::chat::session::SessionSettings;
use crate::llm_client::{CompletionSettings, TypingProfile, DEFAULT_ENDPOINT, DEFAULT_MODEL};

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub completion_endpoint: String,
    pub completion_model: String,
    pub completion_timeout: Duration,
    /// Locally answered replies are streamed with a simulated typing delay.
    pub typing_effect: bool,
    pub contact_form_delay: Duration,
    pub contact_sent_reset: Duration,
    /// Where contact-form messages are posted. Unset: messages are only logged.
    pub contact_webhook_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            completion_endpoint: DEFAULT_ENDPOINT.to_string(),
            completion_model: DEFAULT_MODEL.to_string(),
            completion_timeout: Duration::from_secs(120),
            typing_effect: true,
            contact_form_delay: Duration::from_millis(1000),
            contact_sent_reset: Duration::from_millis(3000),
            contact_webhook_url: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT")?.unwrap_or(defaults.port),
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            completion_endpoint: std::env::var("COMPLETION_ENDPOINT")
                .unwrap_or(defaults.completion_endpoint),
            completion_model: std::env::var("COMPLETION_MODEL")
                .unwrap_or(defaults.completion_model),
            completion_timeout: parse_env("COMPLETION_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.completion_timeout),
            typing_effect: parse_env("TYPING_EFFECT")?.unwrap_or(defaults.typing_effect),
            contact_form_delay: parse_env("CONTACT_FORM_DELAY_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.contact_form_delay),
            contact_sent_reset: parse_env("CONTACT_SENT_RESET_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.contact_sent_reset),
            contact_webhook_url: std::env::var("CONTACT_WEBHOOK_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
        })
    }

    pub fn completion_settings(&self) -> CompletionSettings {
        CompletionSettings {
            endpoint: self.completion_endpoint.clone(),
            model: self.completion_model.clone(),
            timeout: self.completion_timeout,
            typing: if self.typing_effect {
                TypingProfile::default()
            } else {
                TypingProfile::instant()
            },
        }
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            contact_reset_after: self.contact_sent_reset,
        }
    }
}

fn parse_env<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(None),
    }
}
