//! # dbot-core
//!
//! Core types and traits for the bot: [`Bot`], [`Handler`], [`UpdateSource`], message and user types,
//! and tracing initialization. Transport-agnostic; used by dbot-telegram and handler-chain.

pub mod bot;
pub mod error;
pub mod logger;
pub mod source;
pub mod types;

pub use bot::Bot;
pub use error::{DbotError, HandlerError, Result};
pub use logger::init_tracing;
pub use source::{ReplaySource, UpdateSource};
pub use types::{
    Chat, Command, Handler, HandlerResponse, Message, MessageKind, ToCoreMessage, ToCoreUser,
    User,
};
