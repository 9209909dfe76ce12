use anyhow::Result;
use bet_scorer::{
    bet_updater::BetUpdater,
    clients::{
        FileWagerStore, HttpWagerPublisher, HttpWagerStore, JsonLinesPublisher, WagerPublisher,
        WagerStore,
    },
    consumer::NotificationConsumer,
    settings::{Settings, StoreSettings},
};
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load settings (also pulls in .env)
    let settings = Settings::from_env()?;

    // Initialize logging; stdout is reserved for published wagers
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting bet scorer");

    let store: Arc<dyn WagerStore> = match &settings.store {
        StoreSettings::File(path) => Arc::new(FileWagerStore::load(path).await?),
        StoreSettings::Http(url) => {
            info!("Reading wagers from {}", url);
            Arc::new(HttpWagerStore::new(url.clone(), settings.http_timeout))
        }
    };

    let publisher: Arc<dyn WagerPublisher> = match &settings.publish_url {
        Some(url) => {
            info!("Publishing wagers to {}", url);
            Arc::new(HttpWagerPublisher::new(url.clone(), settings.http_timeout))
        }
        None => {
            info!("Publishing wagers to stdout");
            Arc::new(JsonLinesPublisher::stdout())
        }
    };

    let mut consumer = NotificationConsumer::new(BetUpdater::new(store, publisher));
    let input = BufReader::new(tokio::io::stdin());

    tokio::select! {
        result = consumer.run(input) => {
            if let Err(e) = result {
                error!("Notification stream failed: {:#}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown requested");
        }
    }

    consumer.log_statistics();
    Ok(())
}
