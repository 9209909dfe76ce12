use crate::score::{winner_from_score, ScoreError, Winner};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Lifecycle phase reported by an event-state notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventPhase {
    Active,
    Finished,
    Other(String),
}

impl EventPhase {
    /// Only live and finished events move wager states.
    pub fn is_settleable(&self) -> bool {
        matches!(self, EventPhase::Active | EventPhase::Finished)
    }

    pub fn as_str(&self) -> &str {
        match self {
            EventPhase::Active => "active",
            EventPhase::Finished => "finished",
            EventPhase::Other(label) => label,
        }
    }
}

impl From<String> for EventPhase {
    fn from(label: String) -> Self {
        match label.as_str() {
            "active" => EventPhase::Active,
            "finished" => EventPhase::Finished,
            _ => EventPhase::Other(label),
        }
    }
}

impl From<&str> for EventPhase {
    fn from(label: &str) -> Self {
        EventPhase::from(label.to_string())
    }
}

impl From<EventPhase> for String {
    fn from(phase: EventPhase) -> Self {
        match phase {
            EventPhase::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for EventPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event-state change as delivered by the ingestion transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventNotification {
    #[serde(deserialize_with = "scalar_id")]
    pub id: String,
    #[serde(rename = "state")]
    pub phase: EventPhase,
    #[serde(default)]
    pub score: Option<String>,
}

impl EventNotification {
    pub fn new(id: impl Into<String>, phase: impl Into<EventPhase>) -> Self {
        Self {
            id: id.into(),
            phase: phase.into(),
            score: None,
        }
    }

    pub fn with_score(mut self, score: impl Into<String>) -> Self {
        self.score = Some(score.into());
        self
    }

    /// Decode a UTF-8 JSON payload.
    pub fn from_slice(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }

    pub fn winner(&self) -> Result<Winner, ScoreError> {
        let score = self.score.as_deref().ok_or(ScoreError::Missing)?;
        winner_from_score(score)
    }
}

// Producers send ids as strings or bare numbers; both key the same wagers.
pub(crate) fn scalar_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        // Rendered the way the upstream producer keys its wagers
        Value::Bool(true) => Ok("True".to_string()),
        Value::Bool(false) => Ok("False".to_string()),
        other => Err(serde::de::Error::custom(format!(
            "event id must be a string or scalar, got {other}"
        ))),
    }
}
