//! Adapters from Telegram (teloxide) types to dbot_core types.
//! Depends only on teloxide and dbot_core type definitions.

use dbot_core::{Chat, Message, MessageKind, ToCoreMessage, ToCoreUser, User};
use teloxide::types::MessageEntityKind;

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Wraps a teloxide Message for conversion to core [`Message`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        Message {
            id: self.0.id.to_string(),
            user: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(|| User {
                    id: 0,
                    username: None,
                    first_name: None,
                    last_name: None,
                }),
            chat: Chat {
                id: self.0.chat.id.0,
                chat_type: format!("{:?}", self.0.chat.kind),
            },
            content: self.0.text().unwrap_or("").to_string(),
            kind: self.kind(),
            created_at: self.0.date,
        }
    }
}

impl<'a> TelegramMessageWrapper<'a> {
    /// Text messages whose first entity is a bot command at offset 0 are commands; every other
    /// text message is plain text; anything without text is `Other`.
    pub fn kind(&self) -> MessageKind {
        match self.0.text() {
            None => MessageKind::Other,
            Some(_) if self.starts_with_command() => MessageKind::Command,
            Some(_) => MessageKind::Text,
        }
    }

    fn starts_with_command(&self) -> bool {
        self.0
            .entities()
            .map(|entities| {
                entities
                    .iter()
                    .any(|e| e.offset == 0 && matches!(e.kind, MessageEntityKind::BotCommand))
            })
            .unwrap_or(false)
    }
}
