//! Standings table
//!
//! Built from completed matches; sorted by wins, then point difference,
//! then roster order.

use serde::{Deserialize, Serialize};

use super::types::{Match, MatchStatus, Player};

/// One row of the standings table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsEntry {
    pub player: Player,
    pub played: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub points_for: u32,
    pub points_against: u32,
}

impl StandingsEntry {
    fn new(player: Player) -> Self {
        Self {
            player,
            played: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            points_for: 0,
            points_against: 0,
        }
    }

    fn record(&mut self, scored: u32, conceded: u32) {
        self.played += 1;
        self.points_for += scored;
        self.points_against += conceded;
        match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => self.wins += 1,
            std::cmp::Ordering::Less => self.losses += 1,
            std::cmp::Ordering::Equal => self.draws += 1,
        }
    }

    pub fn point_diff(&self) -> i64 {
        i64::from(self.points_for) - i64::from(self.points_against)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    pub entries: Vec<StandingsEntry>,
}

impl Standings {
    /// Tabulate `matches` for every player in `roster`
    pub fn compute(roster: &[Player], matches: &[Match]) -> Self {
        let mut entries: Vec<StandingsEntry> =
            roster.iter().cloned().map(StandingsEntry::new).collect();

        for m in matches.iter().filter(|m| m.status == MatchStatus::Completed) {
            let (Some(score1), Some(score2)) = (m.score1, m.score2) else {
                continue;
            };
            if let Some(entry) = entries.iter_mut().find(|e| e.player.id == m.player1.id) {
                entry.record(score1, score2);
            }
            if let Some(entry) = entries.iter_mut().find(|e| e.player.id == m.player2.id) {
                entry.record(score2, score1);
            }
        }

        // Stable sort keeps roster order for ties
        entries.sort_by(|a, b| {
            b.wins
                .cmp(&a.wins)
                .then_with(|| b.point_diff().cmp(&a.point_diff()))
        });

        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top of the table (if anyone is registered)
    pub fn leader(&self) -> Option<&StandingsEntry> {
        self.entries.first()
    }

    /// 1-indexed rank of a player's alias
    pub fn rank_of(&self, alias: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.player.alias == alias)
            .map(|i| i + 1)
    }
}
