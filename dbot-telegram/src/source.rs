//! Telegram update source: teloxide's polling loop runs in its own task and forwards every
//! converted message over a channel; [`TelegramUpdateSource`] hands them out one at a time.

use async_trait::async_trait;
use dbot_core::{Message, Result, ToCoreMessage, UpdateSource};
use teloxide::prelude::*;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::adapters::TelegramMessageWrapper;

/// [`UpdateSource`] backed by a channel of converted Telegram messages.
pub struct TelegramUpdateSource {
    rx: Mutex<mpsc::UnboundedReceiver<Message>>,
}

impl TelegramUpdateSource {
    /// Starts teloxide long polling for `bot` in a background task. The source ends when the
    /// polling loop stops (Ctrl-C) and the channel closes.
    pub fn spawn(bot: teloxide::Bot) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(async move {
            teloxide::repl(bot, move |msg: teloxide::types::Message| {
                let tx = tx.clone();
                async move {
                    let core_msg = TelegramMessageWrapper(&msg).to_core();
                    debug!(
                        user_id = core_msg.user.id,
                        chat_id = core_msg.chat.id,
                        message_id = %core_msg.id,
                        kind = ?core_msg.kind,
                        "Update received"
                    );
                    if tx.send(core_msg).is_err() {
                        warn!("Update receiver dropped; discarding update");
                    }
                    respond(())
                }
            })
            .await;
            info!("Telegram polling stopped");
        });

        (Self::from_receiver(rx), handle)
    }

    /// Wraps an existing receiver; used by `spawn` and by tests that feed messages directly.
    pub fn from_receiver(rx: mpsc::UnboundedReceiver<Message>) -> Self {
        Self { rx: Mutex::new(rx) }
    }
}

#[async_trait]
impl UpdateSource for TelegramUpdateSource {
    async fn next_update(&self) -> Result<Option<Message>> {
        Ok(self.rx.lock().await.recv().await)
    }
}
