//! Update sources: where inbound messages come from.
//!
//! The runtime only ever asks for the next update; a transport (Telegram long polling) or a
//! fixed replay for tests sits behind [`UpdateSource`].

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::types::Message;

/// Yields inbound messages one at a time. `Ok(None)` means the source is exhausted and the
/// event loop should return.
#[async_trait]
pub trait UpdateSource: Send + Sync {
    async fn next_update(&self) -> Result<Option<Message>>;
}

/// Replays a fixed sequence of messages, then reports exhaustion.
pub struct ReplaySource {
    queue: Mutex<VecDeque<Message>>,
}

impl ReplaySource {
    pub fn new(messages: impl IntoIterator<Item = Message>) -> Self {
        Self {
            queue: Mutex::new(messages.into_iter().collect()),
        }
    }

    /// Number of messages not yet handed out.
    pub async fn remaining(&self) -> usize {
        self.queue.lock().await.len()
    }
}

#[async_trait]
impl UpdateSource for ReplaySource {
    async fn next_update(&self) -> Result<Option<Message>> {
        Ok(self.queue.lock().await.pop_front())
    }
}
