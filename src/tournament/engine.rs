//! Tournament session
//!
//! Owns the roster and the generated match list. All mutation goes through
//! `&mut self`; callers hold the session explicitly instead of sharing a global.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{DECLARED_LOSS_SCORE, DECLARED_WIN_SCORE};
use crate::error::{TournamentError, TournamentResult, ValidationError};
use crate::sim::Side;

use super::records::MatchRecord;
use super::schedule::round_robin;
use super::standings::Standings;
use super::types::{Match, MatchId, MatchStatus, Player, PlayerId};

const DEFAULT_SEED: u64 = 0x5EED_B0A7_D00D_F00D;

/// What a successful mutation changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TournamentEvent {
    PlayerAdded {
        player: Player,
        roster_size: usize,
    },
    Started {
        matches: usize,
        current: Option<MatchId>,
    },
    MatchBegan(MatchId),
    MatchCompleted {
        id: MatchId,
        /// New current match, `None` once everything is played
        next: Option<MatchId>,
        finished: bool,
    },
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tournament {
    seed: u64,
    rng: Pcg32,
    roster: Vec<Player>,
    matches: Vec<Match>,
    current: Option<usize>,
    started: bool,
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new()
    }
}

impl Tournament {
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Session whose generated player ids follow `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            roster: Vec::new(),
            matches: Vec::new(),
            current: None,
            started: false,
        }
    }

    /// Register a player. Aliases are trimmed and need not be unique.
    pub fn add_player(
        &mut self,
        alias: &str,
        id: Option<PlayerId>,
    ) -> TournamentResult<TournamentEvent> {
        if self.started {
            log::warn!("Rejected player '{alias}': tournament already started");
            return Err(ValidationError::AlreadyStarted.into());
        }
        let alias = alias.trim();
        if alias.is_empty() {
            log::warn!("Rejected player with empty alias");
            return Err(ValidationError::EmptyAlias.into());
        }

        let id = match id {
            Some(id) => id,
            None => self.generate_id(),
        };
        let player = Player {
            id,
            alias: alias.to_string(),
        };
        self.roster.push(player.clone());
        log::info!(
            "Registered '{}' ({}), roster size {}",
            player.alias,
            player.id,
            self.roster.len()
        );

        Ok(TournamentEvent::PlayerAdded {
            player,
            roster_size: self.roster.len(),
        })
    }

    fn generate_id(&mut self) -> PlayerId {
        let tag: u32 = self.rng.random();
        PlayerId::new(format!("player-{}-{tag:08x}", self.roster.len() + 1))
    }

    /// Freeze the roster and generate the round-robin schedule
    pub fn start(&mut self) -> TournamentResult<TournamentEvent> {
        if self.started {
            log::warn!("Rejected start: tournament already started");
            return Err(ValidationError::AlreadyStarted.into());
        }
        if self.roster.len() < 2 {
            log::warn!("Rejected start with {} player(s)", self.roster.len());
            return Err(ValidationError::NotEnoughPlayers {
                registered: self.roster.len(),
            }
            .into());
        }

        self.matches = round_robin(&self.roster);
        self.current = if self.matches.is_empty() { None } else { Some(0) };
        self.started = true;
        log::info!(
            "Tournament started: {} players, {} matches",
            self.roster.len(),
            self.matches.len()
        );

        Ok(TournamentEvent::Started {
            matches: self.matches.len(),
            current: self.current_match().map(|m| m.id.clone()),
        })
    }

    /// Index of an open (pending or in-progress) match
    ///
    /// Before `start` there are no matches, so every id is unknown.
    fn open_index(&self, id: &MatchId) -> TournamentResult<usize> {
        self.matches
            .iter()
            .position(|m| m.id == *id && m.status.is_open())
            .ok_or_else(|| TournamentError::MatchNotFound(id.clone()))
    }

    /// Mark a pending match as being played
    pub fn begin_match(&mut self, id: &MatchId) -> TournamentResult<TournamentEvent> {
        let index = self.open_index(id).inspect_err(|e| {
            log::warn!("Rejected begin of {id}: {e}");
        })?;
        let m = &mut self.matches[index];
        if m.status == MatchStatus::Pending {
            m.status = MatchStatus::InProgress;
            log::info!("Match {} began: {} vs {}", m.id, m.player1.alias, m.player2.alias);
        }
        Ok(TournamentEvent::MatchBegan(id.clone()))
    }

    /// Record a final score and move the current pointer on
    ///
    /// Only open matches are addressable: completing the same match twice
    /// fails with [`TournamentError::MatchNotFound`] and changes nothing.
    pub fn complete_match(
        &mut self,
        id: &MatchId,
        score1: u32,
        score2: u32,
    ) -> TournamentResult<TournamentEvent> {
        let index = self.open_index(id).inspect_err(|e| {
            log::warn!("Rejected completion of {id}: {e}");
        })?;

        let m = &mut self.matches[index];
        m.score1 = Some(score1);
        m.score2 = Some(score2);
        m.status = MatchStatus::Completed;
        log::info!(
            "Match {} completed: {} {score1} - {score2} {}",
            m.id,
            m.player1.alias,
            m.player2.alias
        );

        // First pending match in list order, not round order
        self.current = self
            .matches
            .iter()
            .position(|m| m.status == MatchStatus::Pending);
        let next = self.current_match().map(|m| m.id.clone());
        let finished = self.is_complete();
        if finished {
            log::info!("Tournament complete");
        }

        Ok(TournamentEvent::MatchCompleted {
            id: id.clone(),
            next,
            finished,
        })
    }

    /// Complete a match as a fixed 5-3 result for `side`
    pub fn declare_winner(&mut self, id: &MatchId, side: Side) -> TournamentResult<TournamentEvent> {
        let (score1, score2) = match side {
            Side::Left => (DECLARED_WIN_SCORE, DECLARED_LOSS_SCORE),
            Side::Right => (DECLARED_LOSS_SCORE, DECLARED_WIN_SCORE),
        };
        self.complete_match(id, score1, score2)
    }

    /// Back to the freshly constructed state
    pub fn reset(&mut self) -> TournamentEvent {
        *self = Self::with_seed(self.seed);
        log::info!("Tournament reset");
        TournamentEvent::Reset
    }

    pub fn roster(&self) -> &[Player] {
        &self.roster
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn current_match(&self) -> Option<&Match> {
        self.current.and_then(|i| self.matches.get(i))
    }

    pub fn find_match(&self, id: &MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == *id)
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Started and every match played
    pub fn is_complete(&self) -> bool {
        self.started && self.matches.iter().all(|m| !m.status.is_open())
    }

    /// Matches still to be played (pending or in progress)
    pub fn pending_count(&self) -> usize {
        self.matches.iter().filter(|m| m.status.is_open()).count()
    }

    pub fn standings(&self) -> Standings {
        Standings::compute(&self.roster, &self.matches)
    }

    /// Persistence rows for every scheduled match
    pub fn records(&self, tournament_id: u64) -> Vec<MatchRecord> {
        self.matches
            .iter()
            .map(|m| MatchRecord::from_match(tournament_id, m))
            .collect()
    }
}
