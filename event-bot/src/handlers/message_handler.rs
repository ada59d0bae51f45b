//! Plain-text messages: log the text, reply with a fixed acknowledgement.

use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{Bot, Handler, HandlerResponse, Message, MessageKind, Result};
use tracing::{info, instrument, warn};

pub const ACK_REPLY: &str = "Got your message!";

/// Acknowledges every non-command text message with [`ACK_REPLY`]. The content is logged but
/// never inspected or echoed.
pub struct MessageAckHandler {
    bot: Arc<dyn Bot>,
}

impl MessageAckHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Handler for MessageAckHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.kind != MessageKind::Text {
            return Ok(HandlerResponse::Ignore);
        }
        let text = match message.text() {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    error = %e,
                    user_id = message.user.id,
                    message_id = %message.id,
                    "Text message without text, skipping"
                );
                return Ok(HandlerResponse::Ignore);
            }
        };

        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            message_content = %text,
            "Received"
        );
        self.bot.reply_to(message, ACK_REPLY).await?;
        Ok(HandlerResponse::Reply(ACK_REPLY.to_string()))
    }
}
