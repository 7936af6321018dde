use reqwest::StatusCode;
use thiserror::Error;

/// Error taxonomy for one polling tick (plus the fatal startup case).
///
/// Everything except `ConfigMissing` is recoverable: the tick guard in the
/// poller logs it, sends a best-effort failure notification and waits for the
/// next tick. `ConfigMissing` is raised before the loop starts and terminates
/// the process.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("required configuration is missing or invalid")]
    ConfigMissing,

    #[error("homework API request failed: {0}")]
    FetchTransport(#[from] reqwest::Error),

    #[error("homework API returned HTTP {0}")]
    FetchHttp(StatusCode),

    #[error("malformed API response: {0}")]
    MalformedResponse(String),

    #[error("homework record has no \"status\" field")]
    MissingStatus,

    #[error("homework record has no \"homework_name\" field")]
    MissingName,

    #[error("unknown review verdict {0:?}")]
    UnknownVerdict(String),
}
