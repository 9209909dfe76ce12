use config::{Config, Environment};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const ENV_PREFIX: &str = "BET_SCORER";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("no wager store configured; set BET_SCORER_STORE_PATH or BET_SCORER_STORE_URL")]
    MissingStore,

    #[error("both BET_SCORER_STORE_PATH and BET_SCORER_STORE_URL are set; pick one")]
    ConflictingStore,

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Where wagers are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreSettings {
    File(PathBuf),
    Http(String),
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub store: StoreSettings,
    /// Downstream endpoint for updated wagers; stdout when unset.
    pub publish_url: Option<String>,
    pub http_timeout: Duration,
    pub log_level: String,
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    store_path: Option<PathBuf>,
    store_url: Option<String>,
    publish_url: Option<String>,
    http_timeout_secs: u64,
    log_level: String,
}

impl Settings {
    /// Load from `.env` and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::load(
            Environment::with_prefix(ENV_PREFIX),
            std::env::var("DATABASE_LINK").ok(),
        )
    }

    /// `database_link` is the legacy store URL variable, used only when no
    /// store is configured under the prefix.
    pub fn load(env: Environment, database_link: Option<String>) -> Result<Self, ConfigError> {
        let raw: RawSettings = Config::builder()
            .set_default("http_timeout_secs", 10)?
            .set_default("log_level", "info")?
            .add_source(env)
            .build()?
            .try_deserialize()?;

        let store_url = raw
            .store_url
            .filter(|url| !url.is_empty())
            .or_else(|| if raw.store_path.is_none() { database_link } else { None })
            .filter(|url| !url.is_empty());

        let store = match (raw.store_path, store_url) {
            (Some(_), Some(_)) => return Err(ConfigError::ConflictingStore),
            (Some(path), None) => StoreSettings::File(path),
            (None, Some(url)) => StoreSettings::Http(url),
            (None, None) => return Err(ConfigError::MissingStore),
        };

        if raw.http_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "http_timeout_secs",
                reason: "must be at least 1 second".to_string(),
            });
        }

        Ok(Self {
            store,
            publish_url: raw.publish_url.filter(|url| !url.is_empty()),
            http_timeout: Duration::from_secs(raw.http_timeout_secs),
            log_level: raw.log_level,
        })
    }
}
