//! `/start` command: fixed greeting.

use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{Bot, Handler, HandlerResponse, Message, Result};
use tracing::{info, instrument};

pub const START_COMMAND: &str = "start";
pub const START_REPLY: &str = "Hello! I am your event tracking bot.";

/// Replies with [`START_REPLY`] to `/start` (any arguments). A `/start@name` addressed to another
/// bot is ignored when the bot's own username is known.
pub struct StartCommandHandler {
    bot: Arc<dyn Bot>,
    bot_username: Option<String>,
}

impl StartCommandHandler {
    pub fn new(bot: Arc<dyn Bot>, bot_username: Option<String>) -> Self {
        Self { bot, bot_username }
    }
}

#[async_trait]
impl Handler for StartCommandHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(command) = message.command() else {
            return Ok(HandlerResponse::Ignore);
        };
        if !command.is_for(START_COMMAND, self.bot_username.as_deref()) {
            return Ok(HandlerResponse::Ignore);
        }

        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            "Start command"
        );
        self.bot.reply_to(message, START_REPLY).await?;
        Ok(HandlerResponse::Reply(START_REPLY.to_string()))
    }
}
