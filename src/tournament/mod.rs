//! Tournament organizer
//!
//! Round-robin scheduling over a registered roster, result recording and
//! the derived standings/persistence views.

pub mod engine;
pub mod records;
pub mod schedule;
pub mod standings;
pub mod types;

pub use engine::{Tournament, TournamentEvent};
pub use records::MatchRecord;
pub use schedule::{match_count, round_robin};
pub use standings::{Standings, StandingsEntry};
pub use types::{Match, MatchId, MatchStatus, Player, PlayerId};
