use crate::bet_updater::{BetUpdater, UpdateOutcome};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{error, info};

#[derive(Debug, Clone)]
pub struct ConsumerStatistics {
    pub started_at: DateTime<Utc>,
    pub received: usize,
    pub settled: usize,
    pub ignored: usize,
    pub empty: usize,
    pub failed: usize,
    pub wagers_dispatched: usize,
}

impl ConsumerStatistics {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            received: 0,
            settled: 0,
            ignored: 0,
            empty: 0,
            failed: 0,
            wagers_dispatched: 0,
        }
    }

    fn record(&mut self, outcome: &UpdateOutcome) {
        match outcome {
            UpdateOutcome::Ignored { .. } => self.ignored += 1,
            UpdateOutcome::NoWagers { .. } => self.empty += 1,
            UpdateOutcome::Settled { dispatched, .. } => {
                self.settled += 1;
                self.wagers_dispatched += dispatched;
            }
        }
    }
}

impl Default for ConsumerStatistics {
    fn default() -> Self {
        Self::new()
    }
}

/// Feeds newline-delimited notifications to a [`BetUpdater`], one at a time.
pub struct NotificationConsumer {
    updater: BetUpdater,
    statistics: ConsumerStatistics,
}

impl NotificationConsumer {
    pub fn new(updater: BetUpdater) -> Self {
        Self {
            updater,
            statistics: ConsumerStatistics::new(),
        }
    }

    pub fn statistics(&self) -> &ConsumerStatistics {
        &self.statistics
    }

    /// Process every notification until the input closes.
    /// A failed notification is logged and counted; the loop moves on.
    pub async fn run<R>(&mut self, mut input: R) -> Result<ConsumerStatistics>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let read = input
                .read_until(b'\n', &mut buf)
                .await
                .context("Failed to read notification stream")?;
            if read == 0 {
                break;
            }

            // Bytes go straight to the decoder so bad UTF-8 is one rejected notification
            let payload = trim_line(&buf);
            if payload.is_empty() {
                continue;
            }

            self.statistics.received += 1;
            match self.updater.update_bet(payload).await {
                Ok(outcome) => self.statistics.record(&outcome),
                Err(e) => {
                    self.statistics.failed += 1;
                    error!("❌ Notification rejected: {}", e);
                }
            }
        }

        info!("Notification stream closed");
        Ok(self.statistics.clone())
    }

    pub fn log_statistics(&self) {
        let stats = &self.statistics;
        info!(
            "📊 Statistics - Since: {}, Received: {}, Settled: {}, Ignored: {}, No wagers: {}, Failed: {}, Wagers dispatched: {}",
            stats.started_at.to_rfc3339(),
            stats.received,
            stats.settled,
            stats.ignored,
            stats.empty,
            stats.failed,
            stats.wagers_dispatched
        );
    }
}

fn trim_line(line: &[u8]) -> &[u8] {
    let start = line
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(line.len());
    let end = line
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &line[start..end]
}
