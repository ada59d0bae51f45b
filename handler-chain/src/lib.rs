//! # Handler chain
//!
//! Runs a sequence of handlers for each message. Each handler has optional before/handle/after:
//! all before run in order (any false stops the chain); then handle runs in registration order
//! until Stop or Reply; then all after run in reverse.
//!
//! [`run_event_loop`] pulls messages from an [`UpdateSource`] and feeds them through the chain
//! one at a time.

use dbot_core::{Handler, HandlerResponse, Message, Result, UpdateSource};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Chain of handlers: before (all) → handle (until Stop/Reply) → after (reverse).
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends a handler. Registration order is match order.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs all before → handle until Stop/Reply → all after in reverse.
    #[instrument(skip(self, message))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let mut final_response = HandlerResponse::Continue;

        debug!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            message_id = %message.id,
            "step: handler_chain started"
        );

        for h in &self.handlers {
            let name = std::any::type_name_of_val(h.as_ref());
            let should_continue = h.before(message).await?;
            if !should_continue {
                info!(user_id = message.user.id, handler = %name, "step: before returned false, chain stopped");
                return Ok(HandlerResponse::Stop);
            }
        }

        for h in &self.handlers {
            let name = std::any::type_name_of_val(h.as_ref());
            let response = h.handle(message).await?;
            let (response_type, reply_len) = match &response {
                HandlerResponse::Continue => ("Continue", None),
                HandlerResponse::Stop => ("Stop", None),
                HandlerResponse::Ignore => ("Ignore", None),
                HandlerResponse::Reply(s) => ("Reply", Some(s.len())),
            };
            debug!(
                user_id = message.user.id,
                handler = %name,
                response_type = %response_type,
                reply_len = ?reply_len,
                "step: handler handle done"
            );

            match response {
                HandlerResponse::Stop | HandlerResponse::Reply(_) => {
                    final_response = response;
                    break;
                }
                HandlerResponse::Continue | HandlerResponse::Ignore => {}
            }
        }

        for h in self.handlers.iter().rev() {
            h.after(message, &final_response).await?;
        }

        debug!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            message_id = %message.id,
            response = ?final_response,
            "step: handler_chain finished"
        );

        Ok(final_response)
    }
}

/// Counters for one run of [`run_event_loop`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoopStats {
    /// Messages taken from the source.
    pub received: usize,
    /// Messages for which the chain returned an error.
    pub failed: usize,
}

/// Pulls messages from `source` until it is exhausted, handling each one before asking for the
/// next. A chain error is logged and the loop moves on; a source error ends the loop.
#[instrument(skip(source, chain))]
pub async fn run_event_loop(source: &dyn UpdateSource, chain: &HandlerChain) -> Result<LoopStats> {
    let mut stats = LoopStats::default();

    while let Some(message) = source.next_update().await? {
        stats.received += 1;
        if let Err(e) = chain.handle(&message).await {
            stats.failed += 1;
            error!(
                error = %e,
                user_id = message.user.id,
                chat_id = message.chat.id,
                message_id = %message.id,
                "Handler chain failed"
            );
        }
    }

    info!(received = stats.received, failed = stats.failed, "Update source closed");
    Ok(stats)
}

// Unit/integration tests live in tests/handler_chain_test.rs
