mod config;
mod error;
mod notifier;
mod poller;
mod practicum;
mod response;
mod verdict;

use anyhow::Result;
use teloxide::Bot;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::notifier::{Notifier, TelegramTransport};
use crate::poller::Poller;
use crate::practicum::PracticumClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hwbot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration; without valid credentials the loop must never start.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Refusing to start: {}", e);
            return Err(e.into());
        }
    };

    let api = PracticumClient::new(config.practicum_token.clone());

    info!("Configuration loaded successfully");
    info!("  Endpoint: {}", api.endpoint());
    info!("  Notifying chat: {}", config.telegram_chat_id);
    info!("  Poll interval: {}s", config.poll_interval_secs);

    // Create the delivery pipeline
    let bot = Bot::new(config.telegram_token.clone());
    let transport = TelegramTransport::new(bot);
    let notifier = Notifier::new(transport, config.telegram_chat_id.clone());

    let mut poller = Poller::new(api, notifier, config.poll_interval());

    // Run until interrupted; the signal also cuts a pending inter-tick sleep.
    tokio::select! {
        _ = poller.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal, stopping");
        }
    }

    Ok(())
}
