use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use bet_scorer::{Wager, WagerStore};

/// In-memory wager store that counts lookups.
#[derive(Default)]
pub struct MemoryStore {
    wagers: Vec<Wager>,
    lookups: AtomicUsize,
}

impl MemoryStore {
    pub fn new(wagers: Vec<Wager>) -> Self {
        Self {
            wagers,
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WagerStore for MemoryStore {
    async fn fetch_wagers_by_event_id(&self, event_id: &str) -> Result<Vec<Wager>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .wagers
            .iter()
            .filter(|w| w.event_id == event_id)
            .cloned()
            .collect())
    }
}
