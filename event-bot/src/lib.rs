//! # Event tracking bot
//!
//! Wires dbot-core, handler-chain and dbot-telegram: a `/start` greeting and a fixed
//! acknowledgement for every plain-text message. Config comes from env; polling is teloxide's.

pub mod cli;
pub mod components;
pub mod config;
pub mod handlers;
pub mod runner;

pub use cli::{load_config, Cli, Commands};
pub use components::build_handler_chain;
pub use config::BotConfig;
pub use handlers::{MessageAckHandler, StartCommandHandler, ACK_REPLY, START_COMMAND, START_REPLY};
pub use runner::{run_bot, run_with_source};
