use crate::clients::{WagerPublisher, WagerStore};
use crate::event::{EventNotification, EventPhase};
use crate::score::{ScoreError, Winner};
use crate::settlement::settle_wager;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("malformed event notification: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("cannot score event {event_id}: {source}")]
    Format {
        event_id: String,
        #[source]
        source: ScoreError,
    },

    #[error("wager lookup failed for event {event_id}: {source:#}")]
    Store {
        event_id: String,
        source: anyhow::Error,
    },

    #[error("publishing wager {position} of event {event_id} failed after {dispatched} dispatched: {source:#}")]
    Publish {
        event_id: String,
        position: usize,
        dispatched: usize,
        source: anyhow::Error,
    },
}

/// What a single notification did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Phase does not settle wagers; nothing was looked up or sent.
    Ignored { phase: EventPhase },
    /// Nobody bet on the event.
    NoWagers { event_id: String },
    Settled {
        event_id: String,
        winner: Winner,
        dispatched: usize,
    },
}

/// Recomputes and republishes the wagers of an event each time its state changes.
pub struct BetUpdater {
    store: Arc<dyn WagerStore>,
    publisher: Arc<dyn WagerPublisher>,
}

impl BetUpdater {
    pub fn new(store: Arc<dyn WagerStore>, publisher: Arc<dyn WagerPublisher>) -> Self {
        Self { store, publisher }
    }

    /// Decode a raw notification payload and settle its wagers.
    pub async fn update_bet(&self, payload: &[u8]) -> Result<UpdateOutcome, UpdateError> {
        let event = EventNotification::from_slice(payload)?;
        let span = info_span!("update_bet", pass = %Uuid::new_v4(), event_id = %event.id);
        self.update_event(&event).instrument(span).await
    }

    pub async fn update_event(
        &self,
        event: &EventNotification,
    ) -> Result<UpdateOutcome, UpdateError> {
        if !event.phase.is_settleable() {
            debug!("Ignoring event {} in phase '{}'", event.id, event.phase);
            return Ok(UpdateOutcome::Ignored {
                phase: event.phase.clone(),
            });
        }

        let mut wagers = self
            .store
            .fetch_wagers_by_event_id(&event.id)
            .await
            .map_err(|source| UpdateError::Store {
                event_id: event.id.clone(),
                source,
            })?;

        if wagers.is_empty() {
            debug!("No wagers on event {}", event.id);
            return Ok(UpdateOutcome::NoWagers {
                event_id: event.id.clone(),
            });
        }

        // One winner per notification, shared by every wager below
        let winner = event.winner().map_err(|source| UpdateError::Format {
            event_id: event.id.clone(),
            source,
        })?;

        let mut dispatched = 0;
        for (position, wager) in wagers.iter_mut().enumerate() {
            if !settle_wager(wager, &event.phase, winner) {
                continue;
            }

            self.publisher
                .publish(wager)
                .await
                .map_err(|source| UpdateError::Publish {
                    event_id: event.id.clone(),
                    position,
                    dispatched,
                    source,
                })?;
            dispatched += 1;
        }

        info!(
            "✅ Event {} ({}): winner {}, {} wagers updated",
            event.id, event.phase, winner, dispatched
        );

        Ok(UpdateOutcome::Settled {
            event_id: event.id.clone(),
            winner,
            dispatched,
        })
    }
}
