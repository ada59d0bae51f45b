//! Core types: user, chat, message, command, handler response, and Handler trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HandlerError;

/// User identity (id, username, names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Chat (channel, group or private) identity. Replies are routed by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

/// What an inbound message carries, as far as dispatch is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    /// Plain text that is not a bot command.
    Text,
    /// Text starting with a bot command entity (e.g. `/start`).
    Command,
    /// Anything without text (stickers, photos, service messages).
    Other,
}

/// A single inbound message with user, chat and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    /// Text body; empty when the update carried no text.
    pub content: String,
    pub kind: MessageKind,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Returns the text body, or [`HandlerError::NoText`] when there is none.
    pub fn text(&self) -> std::result::Result<&str, HandlerError> {
        if self.content.is_empty() {
            Err(HandlerError::NoText)
        } else {
            Ok(&self.content)
        }
    }

    pub fn is_command(&self) -> bool {
        self.kind == MessageKind::Command
    }

    /// Parses the leading bot command. `None` unless `kind` is [`MessageKind::Command`].
    pub fn command(&self) -> Option<Command> {
        if !self.is_command() {
            return None;
        }
        Command::parse(&self.content).ok()
    }
}

/// A parsed bot command: `/name@mention args`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Lower-cased name without the leading slash.
    pub name: String,
    /// Bot username after `@`, if the command was addressed explicitly.
    pub mention: Option<String>,
    pub args: String,
}

impl Command {
    /// Parses a command from message text. The command token is `/name` or `/name@mention`
    /// where both parts are `[A-Za-z0-9_]+`, the same span Telegram marks as a `bot_command`
    /// entity; everything after it is the argument string, so `/start, please` is `start`.
    /// Command names are matched case-insensitively, so the name is lower-cased here.
    pub fn parse(text: &str) -> std::result::Result<Self, HandlerError> {
        let rest = text
            .strip_prefix('/')
            .ok_or_else(|| HandlerError::InvalidCommand(text.to_string()))?;
        let (name, mut tail) = rest.split_at(command_token_len(rest));
        if name.is_empty() {
            return Err(HandlerError::EmptyContent);
        }

        let mut mention = None;
        if let Some(after_at) = tail.strip_prefix('@') {
            let (username, after) = after_at.split_at(command_token_len(after_at));
            if !username.is_empty() {
                mention = Some(username.to_string());
                tail = after;
            }
        }

        Ok(Self {
            name: name.to_lowercase(),
            mention,
            args: tail.trim().to_string(),
        })
    }

    /// True when the command is named `name` and, if it carries a mention, the mention is
    /// `bot_username` (case-insensitive). With no known username any mention is accepted.
    pub fn is_for(&self, name: &str, bot_username: Option<&str>) -> bool {
        if !self.name.eq_ignore_ascii_case(name) {
            return false;
        }
        match (&self.mention, bot_username) {
            (Some(mention), Some(username)) => mention.eq_ignore_ascii_case(username),
            _ => true,
        }
    }
}

/// Byte length of the leading run of command characters (`[A-Za-z0-9_]`).
fn command_token_len(s: &str) -> usize {
    s.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(s.len())
}

/// Handler result for the chain. `Reply(text)` carries the response body sent to the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain; the handler replied with this text.
    Reply(String),
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// Single handler concept: optional before / handle / after. Chain runs all before → handle until Stop/Reply → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the message. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _message: &Message) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}
