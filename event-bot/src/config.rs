//! Application config: the injected credential plus logging and API settings. Loaded from env.

use anyhow::Result;
use dbot_telegram::TelegramConfig;

/// Runtime configuration passed into [`crate::run_bot`]. The token is never compiled in.
#[derive(Debug, Clone)]
pub struct BotConfig {
    telegram: TelegramConfig,
}

impl BotConfig {
    /// Loads from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let telegram = match token {
            Some(token) => TelegramConfig::with_env_defaults(token),
            None => TelegramConfig::from_env()?,
        };
        Ok(Self { telegram })
    }

    pub fn validate(&self) -> Result<()> {
        self.telegram.validate()
    }

    pub fn telegram(&self) -> &TelegramConfig {
        &self.telegram
    }

    pub fn bot_token(&self) -> &str {
        &self.telegram.bot_token
    }

    pub fn telegram_api_url(&self) -> Option<&str> {
        self.telegram.telegram_api_url.as_deref()
    }

    pub fn log_file(&self) -> &str {
        &self.telegram.log_file
    }
}
