use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use crate::error::BotError;

const ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetch capability the polling loop is driven by. Implemented by the real
/// HTTP client below and by in-process fakes in tests.
#[async_trait]
pub trait HomeworkApi {
    /// Fetch the raw status payload for changes since `from_date`.
    async fn fetch_statuses(&self, from_date: i64) -> Result<Value, BotError>;
}

/// HTTP client for the Practicum homework status API.
pub struct PracticumClient {
    client: reqwest::Client,
    token: String,
}

impl PracticumClient {
    pub fn new(token: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self { client, token }
    }

    pub fn endpoint(&self) -> &'static str {
        ENDPOINT
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn fetch_statuses(&self, from_date: i64) -> Result<Value, BotError> {
        debug!("Requesting homework statuses since {}", from_date);

        let response = self
            .client
            .get(ENDPOINT)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await?;

        // Only HTTP 200 counts as success for this API.
        let status = response.status();
        if status != StatusCode::OK {
            return Err(BotError::FetchHttp(status));
        }

        let payload = response.json().await?;
        Ok(payload)
    }
}
