use std::time::Duration;

use chrono::Utc;
use tracing::{debug, error, info};

use crate::error::BotError;
use crate::notifier::{MessageTransport, Notifier};
use crate::practicum::HomeworkApi;
use crate::response;
use crate::verdict;

/// The polling loop: fetch → validate → resolve → notify → advance → sleep.
///
/// Every tick runs inside a failure boundary; any error short of startup
/// misconfiguration is logged, reported to the chat best-effort, and retried
/// on the next tick. The loop owns the cursor and never exits on its own.
pub struct Poller<A, T> {
    api: A,
    notifier: Notifier<T>,
    interval: Duration,
    /// Unix timestamp of the start of the next fetch window.
    cursor: i64,
}

impl<A, T> Poller<A, T>
where
    A: HomeworkApi,
    T: MessageTransport,
{
    /// Create a poller whose first window starts now.
    pub fn new(api: A, notifier: Notifier<T>, interval: Duration) -> Self {
        Self {
            api,
            notifier,
            interval,
            cursor: Utc::now().timestamp(),
        }
    }

    /// Run ticks forever at the configured interval.
    pub async fn run(&mut self) {
        info!(
            "Polling for homework status changes every {}s",
            self.interval.as_secs()
        );

        loop {
            self.tick().await;
            tokio::time::sleep(self.interval).await;
        }
    }

    /// Execute one tick: the guarded pipeline plus the cursor advance.
    ///
    /// The cursor moves to "now" whether the pipeline succeeded or failed.
    /// A failed window is never re-fetched — changes that arrived during it
    /// are only seen again if the service reports them in a later window.
    pub async fn tick(&mut self) {
        match self.poll_once().await {
            Ok(0) => debug!("No homework changes in this window"),
            Ok(count) => info!("Delivered {} status notification(s)", count),
            Err(e) => {
                error!("Tick failed: {}", e);
                self.notifier
                    .notify(&format!("Program failure: {}", e))
                    .await;
            }
        }

        // The cursor never moves backward, even if the wall clock does.
        self.cursor = Utc::now().timestamp().max(self.cursor);
    }

    /// The fallible part of a tick. Records are processed most recent first;
    /// the first unresolvable record aborts the rest of the batch.
    async fn poll_once(&self) -> Result<usize, BotError> {
        let payload = self.api.fetch_statuses(self.cursor).await?;
        let result = response::validate(&payload)?;

        debug!(
            "Validated response at service time {} with {} record(s)",
            result.current_date,
            result.homeworks.len()
        );

        for record in result.homeworks.iter().rev() {
            let message = verdict::status_change_message(record)?;
            self.notifier.notify(&message).await;
        }

        Ok(result.homeworks.len())
    }
}
