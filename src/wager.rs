use crate::score::Winner;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Outcome a wager was placed on. Labels other than `team_1`/`team_2`
/// are scored as the draw side; the raw label is kept for republishing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Market {
    Team1,
    Team2,
    Other(String),
}

impl Market {
    pub fn side(&self) -> Winner {
        match self {
            Market::Team1 => Winner::Team1,
            Market::Team2 => Winner::Team2,
            Market::Other(_) => Winner::Draw,
        }
    }

    /// Whether this market is on the side currently ahead.
    pub fn matches(&self, winner: Winner) -> bool {
        self.side() == winner
    }

    pub fn as_str(&self) -> &str {
        match self {
            Market::Team1 => "team_1",
            Market::Team2 => "team_2",
            Market::Other(label) => label,
        }
    }
}

impl From<String> for Market {
    fn from(label: String) -> Self {
        match label.as_str() {
            "team_1" => Market::Team1,
            "team_2" => Market::Team2,
            _ => Market::Other(label),
        }
    }
}

impl From<&str> for Market {
    fn from(label: &str) -> Self {
        Market::from(label.to_string())
    }
}

impl From<Market> for String {
    fn from(market: Market) -> Self {
        match market {
            Market::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

/// Settlement label carried on a wager record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WagerState {
    Winning, // Live event, market ahead
    Losing,  // Live event, market behind
    Win,     // Finished event, market won
    Lose,    // Finished event, market lost
    /// Whatever the store had before this service touched the wager.
    Other(String),
}

impl WagerState {
    pub fn as_str(&self) -> &str {
        match self {
            WagerState::Winning => "winning",
            WagerState::Losing => "losing",
            WagerState::Win => "win",
            WagerState::Lose => "lose",
            WagerState::Other(label) => label,
        }
    }
}

impl From<String> for WagerState {
    fn from(label: String) -> Self {
        match label.as_str() {
            "winning" => WagerState::Winning,
            "losing" => WagerState::Losing,
            "win" => WagerState::Win,
            "lose" => WagerState::Lose,
            _ => WagerState::Other(label),
        }
    }
}

impl From<WagerState> for String {
    fn from(state: WagerState) -> Self {
        match state {
            WagerState::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for WagerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A wager record as held by the store. Columns this service does not
/// interpret are carried through untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wager {
    #[serde(deserialize_with = "crate::event::scalar_id")]
    pub event_id: String,
    pub market: Market,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<WagerState>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Wager {
    pub fn new(event_id: impl Into<String>, market: impl Into<Market>) -> Self {
        Self {
            event_id: event_id.into(),
            market: market.into(),
            state: None,
            extra: Map::new(),
        }
    }

    pub fn with_state(mut self, state: WagerState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}
