//! Rows handed to the persistence layer
//!
//! The engine never depends on storage succeeding: records are a read-only
//! projection of the in-memory schedule.

use serde::{Deserialize, Serialize};

use super::types::{Match, MatchStatus, PlayerId};

/// One `tournament_matches` row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub tournament_id: u64,
    pub round: u32,
    pub match_number: u32,
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,
    pub winner_id: Option<PlayerId>,
    pub status: MatchStatus,
}

impl MatchRecord {
    pub fn from_match(tournament_id: u64, m: &Match) -> Self {
        Self {
            tournament_id,
            round: m.round,
            match_number: m.number,
            player1_id: m.player1.id.clone(),
            player2_id: m.player2.id.clone(),
            winner_id: m.winner().map(|p| p.id.clone()),
            status: m.status,
        }
    }
}

/// Serialize records as a JSON array
pub fn to_json(records: &[MatchRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}
