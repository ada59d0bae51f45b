//! Wraps teloxide::Bot and implements [`dbot_core::Bot`]. Production code sends messages via Telegram; tests can substitute another Bot impl.

use async_trait::async_trait;
use dbot_core::{Bot as CoreBot, Chat, DbotError, Result};
use teloxide::{prelude::*, types::ChatId};
use tracing::{info, warn};

/// Thin wrapper around teloxide::Bot that implements dbot-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Looks up the bot's own username via getMe. Failures are logged and yield `None`;
    /// command mentions are then accepted for any bot name.
    pub async fn username(&self) -> Option<String> {
        match self.bot.get_me().await {
            Ok(me) => {
                let username = me.user.username.clone();
                if let Some(name) = &username {
                    info!(username = %name, "Bot username resolved");
                }
                username
            }
            Err(e) => {
                warn!(error = %e, "getMe failed; command mentions will not be checked");
                None
            }
        }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }
}
