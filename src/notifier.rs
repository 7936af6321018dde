use anyhow::{Context, Result};
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::Recipient;
use tracing::{debug, error};

/// Message delivery capability behind the notifier. Implementations send one
/// plain-text message to the given destination.
#[async_trait]
pub trait MessageTransport {
    async fn send_text(&self, destination: &str, text: &str) -> Result<()>;
}

/// Telegram delivery via the Bot API.
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl MessageTransport for TelegramTransport {
    async fn send_text(&self, destination: &str, text: &str) -> Result<()> {
        let recipient = parse_recipient(destination)?;
        self.bot
            .send_message(recipient, text)
            .await
            .context("Telegram API rejected the message")?;
        Ok(())
    }
}

/// Map the configured destination to a Telegram recipient: "@name" addresses
/// a public channel, anything else must be a numeric chat id.
fn parse_recipient(destination: &str) -> Result<Recipient> {
    if destination.starts_with('@') {
        return Ok(Recipient::ChannelUsername(destination.to_owned()));
    }

    let chat_id = destination.parse::<i64>().with_context(|| {
        format!(
            "chat destination {:?} is neither numeric nor an @username",
            destination
        )
    })?;
    Ok(Recipient::Id(ChatId(chat_id)))
}

/// Best-effort notification sender.
///
/// Delivery failures are logged and swallowed here: losing one message is
/// preferable to aborting the polling loop. Callers must not assume delivery
/// succeeded.
pub struct Notifier<T> {
    transport: T,
    destination: String,
}

impl<T: MessageTransport> Notifier<T> {
    pub fn new(transport: T, destination: String) -> Self {
        Self {
            transport,
            destination,
        }
    }

    /// Send `text` to the configured destination, never failing the caller.
    pub async fn notify(&self, text: &str) {
        match self.transport.send_text(&self.destination, text).await {
            Ok(()) => debug!("Notification sent: {}", text),
            Err(e) => error!("Failed to deliver notification: {:#}", e),
        }
    }
}
