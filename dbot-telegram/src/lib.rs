//! # dbot-telegram
//!
//! Telegram transport layer: adapters, [`dbot_core::Bot`] implementation, polling update source, minimal config.
//! Handles only Telegram connectivity; no persistence, memory, or AI logic.

mod adapters;
mod bot_adapter;
mod config;
mod source;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::{TelegramConfig, DEFAULT_LOG_FILE};
pub use source::TelegramUpdateSource;
