//! Handler chain assembly.

use std::sync::Arc;

use dbot_core::Bot;
use handler_chain::HandlerChain;

use crate::handlers::{MessageAckHandler, StartCommandHandler};

/// Builds the chain: `/start` is checked before the plain-text acknowledgement, so command
/// messages never reach the acknowledgement handler.
pub fn build_handler_chain(bot: Arc<dyn Bot>, bot_username: Option<String>) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(StartCommandHandler::new(bot.clone(), bot_username)))
        .add_handler(Arc::new(MessageAckHandler::new(bot)))
}
