use anyhow::Result;
use std::sync::Arc;

use dbot_core::{init_tracing, Bot, UpdateSource};
use dbot_telegram::{TelegramBotAdapter, TelegramUpdateSource};
use handler_chain::{run_event_loop, LoopStats};
use tracing::{error, info, instrument};

use super::components::build_handler_chain;
use super::config::BotConfig;

/// Main entry: validate config, init logging, resolve the bot username, register handlers, then
/// block on Telegram long polling until the process is interrupted.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        log_file = %config.log_file(),
        custom_api_url = config.telegram_api_url().is_some(),
        "Initializing bot"
    );

    let teloxide_bot = config.telegram().build_bot()?;
    let adapter = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let bot_username = adapter.username().await;

    let (source, polling) = TelegramUpdateSource::spawn(teloxide_bot);
    info!("Bot is running...");

    run_with_source(&source, adapter, bot_username).await?;

    if let Err(e) = polling.await {
        error!(error = %e, "Polling task failed");
    }
    info!("Bot stopped");
    Ok(())
}

/// Registers the handlers against `bot` and consumes `source` until it is exhausted. This is the
/// whole runtime minus Telegram; tests drive it with a replaying source and a recording bot.
#[instrument(skip(source, bot, bot_username))]
pub async fn run_with_source(
    source: &dyn UpdateSource,
    bot: Arc<dyn Bot>,
    bot_username: Option<String>,
) -> Result<LoopStats> {
    let chain = build_handler_chain(bot, bot_username);
    let stats = run_event_loop(source, &chain).await?;
    Ok(stats)
}
