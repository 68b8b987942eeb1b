//! Telegram transport settings.

use config::{Config, ConfigError};
use serde::{Deserialize, Serialize};
use sightseer_core::config::BackendSettings;
use std::sync::Arc;

/// Telegram transport settings loaded from environment variables.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TelegramSettings {
    /// Telegram Bot API token. `BOT_TOKEN` is accepted as well.
    #[serde(alias = "bot_token")]
    pub telegram_token: String,
}

impl TelegramSettings {
    /// Create new settings by loading from environment and files.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if loading fails or no token is configured.
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_config(sightseer_core::config::build_config()?)
    }

    /// Deserialize Telegram settings from an already built `Config`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the token is missing or blank.
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let settings: Self = config.try_deserialize()?;
        if settings.telegram_token.trim().is_empty() {
            return Err(ConfigError::Message(
                "telegram_token must not be empty".to_string(),
            ));
        }
        Ok(settings)
    }
}

/// Combined settings used by the Telegram transport layer.
#[derive(Clone)]
pub struct BotSettings {
    /// Attraction backend settings.
    pub backend: Arc<BackendSettings>,
    /// Telegram-specific settings.
    pub telegram: Arc<TelegramSettings>,
}

impl BotSettings {
    /// Create a new combined settings bundle.
    #[must_use]
    pub fn new(backend: BackendSettings, telegram: TelegramSettings) -> Self {
        Self {
            backend: Arc::new(backend),
            telegram: Arc::new(telegram),
        }
    }
}
