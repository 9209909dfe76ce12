// Core modules
pub mod event;
pub mod score;
pub mod wager;
pub mod settlement;
pub mod bet_updater;
pub mod clients;
pub mod consumer;
pub mod settings;

// Re-exports
pub use event::{EventNotification, EventPhase};
pub use score::{winner_from_score, ScoreError, Winner};
pub use wager::{Market, Wager, WagerState};
pub use settlement::{settle_wager, transition};
pub use bet_updater::{BetUpdater, UpdateError, UpdateOutcome};
pub use clients::{
    FileWagerStore, HttpWagerPublisher, HttpWagerStore, JsonLinesPublisher, WagerPublisher,
    WagerStore,
};
pub use consumer::{ConsumerStatistics, NotificationConsumer};
pub use settings::{ConfigError, Settings, StoreSettings};
