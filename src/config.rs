use std::env;
use std::time::Duration;

use tracing::error;

use crate::error::BotError;

const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;

/// Immutable process configuration, read once from the environment at startup
/// and passed by reference to everything that needs it.
#[derive(Debug, Clone)]
pub struct Config {
    /// OAuth token for the homework review API.
    pub practicum_token: String,
    /// Telegram bot token used for notification delivery.
    pub telegram_token: String,
    /// Destination chat: a numeric chat id or an "@username" channel.
    pub telegram_chat_id: String,
    /// Seconds between polling ticks.
    pub poll_interval_secs: u64,
}

impl Config {
    /// Load configuration from the environment, honoring a `.env` file in the
    /// working directory.
    ///
    /// Every missing required variable is logged before the error is
    /// returned, so operators see the full list in a single run.
    pub fn from_env() -> Result<Self, BotError> {
        dotenvy::dotenv().ok();

        let practicum_token = require_var("PRACTICUM_TOKEN");
        let telegram_token = require_var("TELEGRAM_TOKEN");
        let telegram_chat_id = require_var("TELEGRAM_CHAT_ID");

        let (Some(practicum_token), Some(telegram_token), Some(telegram_chat_id)) =
            (practicum_token, telegram_token, telegram_chat_id)
        else {
            return Err(BotError::ConfigMissing);
        };

        let poll_interval_secs = match env::var("POLL_INTERVAL_SECS") {
            Ok(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    error!(
                        "POLL_INTERVAL_SECS must be a positive integer, got {:?}",
                        raw
                    );
                    return Err(BotError::ConfigMissing);
                }
            },
            Err(_) => DEFAULT_POLL_INTERVAL_SECS,
        };

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            poll_interval_secs,
        })
    }

    /// Delay between polling ticks.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// Read one required variable, logging its absence at the highest severity.
/// Matches the original credential check: only an unset variable is fatal.
fn require_var(name: &'static str) -> Option<String> {
    match env::var(name) {
        Ok(value) => Some(value),
        Err(_) => {
            error!("required environment variable {} is not set", name);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for name in [
            "PRACTICUM_TOKEN",
            "TELEGRAM_TOKEN",
            "TELEGRAM_CHAT_ID",
            "POLL_INTERVAL_SECS",
        ] {
            env::remove_var(name);
        }
    }

    fn set_required() {
        env::set_var("PRACTICUM_TOKEN", "practicum-token");
        env::set_var("TELEGRAM_TOKEN", "telegram-token");
        env::set_var("TELEGRAM_CHAT_ID", "123456");
    }

    #[test]
    #[serial]
    fn test_loads_with_all_required_vars() {
        clear_env();
        set_required();

        let config = Config::from_env().unwrap();
        assert_eq!(config.practicum_token, "practicum-token");
        assert_eq!(config.telegram_token, "telegram-token");
        assert_eq!(config.telegram_chat_id, "123456");
        assert_eq!(config.poll_interval_secs, DEFAULT_POLL_INTERVAL_SECS);
        assert_eq!(config.poll_interval(), Duration::from_secs(600));
    }

    #[test]
    #[serial]
    fn test_missing_any_credential_is_fatal() {
        for missing in ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"] {
            clear_env();
            set_required();
            env::remove_var(missing);

            let err = Config::from_env().unwrap_err();
            assert!(matches!(err, BotError::ConfigMissing), "{} unset", missing);
        }
    }

    #[test]
    #[serial]
    fn test_poll_interval_override() {
        clear_env();
        set_required();
        env::set_var("POLL_INTERVAL_SECS", "30");

        let config = Config::from_env().unwrap();
        assert_eq!(config.poll_interval(), Duration::from_secs(30));
    }

    #[test]
    #[serial]
    fn test_unparseable_poll_interval_is_fatal() {
        clear_env();
        set_required();
        env::set_var("POLL_INTERVAL_SECS", "soon");

        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, BotError::ConfigMissing));
    }

    #[test]
    #[serial]
    fn test_zero_poll_interval_is_fatal() {
        clear_env();
        set_required();
        env::set_var("POLL_INTERVAL_SECS", "0");

        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, BotError::ConfigMissing));
    }
}
