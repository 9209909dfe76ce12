use crate::wager::Wager;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Read side of the wager store.
#[async_trait]
pub trait WagerStore: Send + Sync {
    /// All wagers placed on `event_id`, in store order. Empty when nobody bet.
    async fn fetch_wagers_by_event_id(&self, event_id: &str) -> Result<Vec<Wager>>;
}

/// Outbound channel for updated wagers.
#[async_trait]
pub trait WagerPublisher: Send + Sync {
    async fn publish(&self, wager: &Wager) -> Result<()>;
}

fn http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .unwrap_or_else(|_| Client::new())
}

// Wager store backed by a JSON snapshot file
pub struct FileWagerStore {
    wagers: Vec<Wager>,
}

impl FileWagerStore {
    pub fn new(wagers: Vec<Wager>) -> Self {
        Self { wagers }
    }

    /// Load a JSON array of wager records.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read wager snapshot {}", path.display()))?;
        let wagers: Vec<Wager> = serde_json::from_slice(&raw)
            .with_context(|| format!("Failed to parse wager snapshot {}", path.display()))?;

        info!("📂 Loaded {} wagers from {}", wagers.len(), path.display());
        Ok(Self::new(wagers))
    }

    pub fn len(&self) -> usize {
        self.wagers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wagers.is_empty()
    }
}

#[async_trait]
impl WagerStore for FileWagerStore {
    async fn fetch_wagers_by_event_id(&self, event_id: &str) -> Result<Vec<Wager>> {
        Ok(self
            .wagers
            .iter()
            .filter(|w| w.event_id == event_id)
            .cloned()
            .collect())
    }
}

// Wager store behind an HTTP API
pub struct HttpWagerStore {
    http_client: Client,
    base_url: String,
}

impl HttpWagerStore {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http_client: http_client(timeout),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl WagerStore for HttpWagerStore {
    async fn fetch_wagers_by_event_id(&self, event_id: &str) -> Result<Vec<Wager>> {
        let response = self
            .http_client
            .get(format!("{}/wagers", self.base_url))
            .query(&[("event_id", event_id)])
            .send()
            .await
            .context("Failed to fetch wagers")?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "Wager store error: {} - {}",
                status,
                response.text().await.unwrap_or_default()
            ));
        }

        let wagers: Vec<Wager> = response
            .json()
            .await
            .context("Failed to parse wager store response")?;

        debug!("Fetched {} wagers for event {}", wagers.len(), event_id);
        Ok(wagers)
    }
}

/// Writes each wager as one JSON document per line.
pub struct JsonLinesPublisher<W> {
    writer: Mutex<W>,
}

impl<W> JsonLinesPublisher<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl JsonLinesPublisher<tokio::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

#[async_trait]
impl<W> WagerPublisher for JsonLinesPublisher<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn publish(&self, wager: &Wager) -> Result<()> {
        let mut line = serde_json::to_vec(wager).context("Failed to serialize wager")?;
        line.push(b'\n');

        let mut writer = self.writer.lock().await;
        writer
            .write_all(&line)
            .await
            .context("Failed to write wager")?;
        writer.flush().await.context("Failed to flush wager")?;
        Ok(())
    }
}

// Publisher that POSTs each wager to a downstream endpoint
pub struct HttpWagerPublisher {
    http_client: Client,
    url: String,
}

impl HttpWagerPublisher {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http_client: http_client(timeout),
            url: url.into(),
        }
    }
}

#[async_trait]
impl WagerPublisher for HttpWagerPublisher {
    async fn publish(&self, wager: &Wager) -> Result<()> {
        let response = self
            .http_client
            .post(&self.url)
            .json(wager)
            .send()
            .await
            .context("Failed to publish wager")?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "Publish rejected: {} - {}",
                status,
                response.text().await.unwrap_or_default()
            ));
        }

        Ok(())
    }
}
