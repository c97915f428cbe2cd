//! Round-robin schedule generation
//!
//! Every player meets every other player exactly once, so no byes are needed
//! whatever the roster parity. Matches come out in roster order: all of
//! player 0's pairings, then player 1's remaining ones, and so on.

use super::types::{Match, MatchId, MatchStatus, Player};

/// Number of matches a round-robin over `players` entrants produces
#[inline]
pub fn match_count(players: usize) -> usize {
    players * players.saturating_sub(1) / 2
}

/// Pair every roster entry with every later one
pub fn round_robin(roster: &[Player]) -> Vec<Match> {
    let mut matches = Vec::with_capacity(match_count(roster.len()));
    for (i, player1) in roster.iter().enumerate() {
        for (j, player2) in roster.iter().enumerate().skip(i + 1) {
            matches.push(Match {
                id: MatchId::for_pair(i, j),
                round: (i + 1) as u32,
                number: (j - i) as u32,
                player1: player1.clone(),
                player2: player2.clone(),
                score1: None,
                score2: None,
                status: MatchStatus::Pending,
            });
        }
    }
    matches
}
