//! Error types for match and tournament operations
//!
//! Simulation stepping has no error channel; everything here is a rejected
//! precondition reported synchronously, with no partial mutation.

use thiserror::Error;

use crate::game::MatchPhase;
use crate::tournament::MatchId;

/// A precondition the caller violated
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Alias was empty after trimming
    #[error("player alias must not be empty")]
    EmptyAlias,

    /// Roster is frozen once the tournament starts
    #[error("tournament already started")]
    AlreadyStarted,

    /// Round-robin needs a pair
    #[error("need at least 2 players to start a tournament, have {registered}")]
    NotEnoughPlayers {
        /// Players registered so far
        registered: usize,
    },
}

/// Errors from the tournament engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TournamentError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No pending or in-progress match carries this id
    #[error("match not found: {0}")]
    MatchNotFound(MatchId),
}

/// Errors from the match controller
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// Lifecycle step not allowed from the current phase
    #[error("cannot {action} a match that is {from:?}")]
    InvalidTransition {
        from: MatchPhase,
        action: &'static str,
    },
}

/// Result type for tournament operations.
pub type TournamentResult<T> = Result<T, TournamentError>;

/// Errors setting up the GPU renderer
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    /// Surface reported no usable texture format
    #[error("surface has no supported formats")]
    NoSurfaceFormat,
}
