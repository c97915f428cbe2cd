//! Tournament entities: players and matches

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sim::Side;

/// Opaque player identifier (caller-supplied or generated)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered participant; immutable once created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub alias: String,
}

/// Match identifier, derived from the roster positions of the pairing
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchId(String);

impl MatchId {
    /// Id for the pairing of roster entries `i` and `j`
    pub fn for_pair(i: usize, j: usize) -> Self {
        Self(format!("{i}-{j}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MatchId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Pending,
    InProgress,
    Completed,
}

impl MatchStatus {
    /// Same label serde writes
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Pending => "pending",
            MatchStatus::InProgress => "in_progress",
            MatchStatus::Completed => "completed",
        }
    }

    /// Still to be played (pending or being played)
    pub fn is_open(&self) -> bool {
        *self != MatchStatus::Completed
    }
}

/// One scheduled pairing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// 1-based round (roster position of player 1)
    pub round: u32,
    /// 1-based position within the round
    pub number: u32,
    pub player1: Player,
    pub player2: Player,
    pub score1: Option<u32>,
    pub score2: Option<u32>,
    pub status: MatchStatus,
}

impl Match {
    pub fn player(&self, side: Side) -> &Player {
        match side {
            Side::Left => &self.player1,
            Side::Right => &self.player2,
        }
    }

    /// Side with the higher recorded score; `None` for draws and unplayed matches
    pub fn winning_side(&self) -> Option<Side> {
        match (self.score1, self.score2) {
            (Some(a), Some(b)) if a > b => Some(Side::Left),
            (Some(a), Some(b)) if b > a => Some(Side::Right),
            _ => None,
        }
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winning_side().map(|side| self.player(side))
    }

    pub fn involves(&self, id: &PlayerId) -> bool {
        self.player1.id == *id || self.player2.id == *id
    }
}
