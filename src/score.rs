use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which side is ahead on the scoreboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Draw,
    Team1,
    Team2,
}

impl Winner {
    /// Numeric encoding used by downstream consumers: 0 = draw, 1 = team_1, 2 = team_2.
    pub fn code(self) -> u8 {
        match self {
            Winner::Draw => 0,
            Winner::Team1 => 1,
            Winner::Team2 => 2,
        }
    }
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Winner::Draw => write!(f, "draw"),
            Winner::Team1 => write!(f, "team_1"),
            Winner::Team2 => write!(f, "team_2"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    #[error("notification has no score")]
    Missing,

    #[error("score '{score}' must contain exactly one '-' separator")]
    Separator { score: String },

    #[error("score '{score}' has a non-integer side '{side}'")]
    NotAnInteger { score: String, side: String },
}

/// Interpret a `"<team_1>-<team_2>"` score as the currently winning side.
pub fn winner_from_score(score: &str) -> Result<Winner, ScoreError> {
    let mut sides = score.split('-');
    let (first, second) = match (sides.next(), sides.next(), sides.next()) {
        (Some(first), Some(second), None) => (first, second),
        _ => {
            return Err(ScoreError::Separator {
                score: score.to_string(),
            })
        }
    };

    let team_1 = parse_side(score, first)?;
    let team_2 = parse_side(score, second)?;

    Ok(if team_1 == team_2 {
        Winner::Draw
    } else if team_1 > team_2 {
        Winner::Team1
    } else {
        Winner::Team2
    })
}

/// A non-negative tally of any length, with leading zeros stripped.
/// Negative tallies never reach here since `-` is the separator.
#[derive(Debug, PartialEq, Eq)]
struct Tally<'a>(&'a str);

impl Ord for Tally<'_> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(other.0))
    }
}

impl PartialOrd for Tally<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

fn parse_side<'a>(score: &str, side: &'a str) -> Result<Tally<'a>, ScoreError> {
    let digits = side.trim();
    let digits = digits.strip_prefix('+').unwrap_or(digits);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ScoreError::NotAnInteger {
            score: score.to_string(),
            side: side.to_string(),
        });
    }

    let significant = digits.trim_start_matches('0');
    Ok(Tally(if significant.is_empty() { "0" } else { significant }))
}
