use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use bet_scorer::{Wager, WagerPublisher};

/// Collects every published wager for assertions.
#[derive(Default)]
pub struct RecordingPublisher {
    wagers: Mutex<Vec<Wager>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(&self) -> Vec<Wager> {
        self.wagers.lock().expect("lock published wagers").clone()
    }
}

#[async_trait]
impl WagerPublisher for RecordingPublisher {
    async fn publish(&self, wager: &Wager) -> Result<()> {
        self.wagers
            .lock()
            .expect("lock published wagers")
            .push(wager.clone());
        Ok(())
    }
}
