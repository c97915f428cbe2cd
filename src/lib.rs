//! Pong Tournament - classic two-paddle Pong with a round-robin organizer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (input sampling, physics step, scoring)
//! - `game`: Match lifecycle driven at a fixed tick rate
//! - `tournament`: Roster, round-robin schedule, results and standings
//! - `renderer`: Render sinks (WebGPU pipeline and headless recorder)
//! - `settings`: Persisted player preferences

pub mod error;
pub mod game;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tournament;

pub use error::{MatchError, RenderError, TournamentError, TournamentResult, ValidationError};
pub use game::{MatchController, MatchOutcome, MatchPhase, WinPolicy};
pub use settings::Settings;
pub use sim::{Arena, HeldKeys, Side, SimulationState, TickInput, step};
pub use tournament::{Match, MatchId, MatchStatus, Player, PlayerId, Tournament};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate, independent of display refresh
    pub const TICK_RATE_HZ: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the accumulator accepts (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Arena dimensions (pixels)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 400.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 80.0;
    /// Pixels per tick while a movement key is held
    pub const PADDLE_SPEED: f32 = 5.0;

    /// Ball defaults (the ball is a square)
    pub const BALL_SIZE: f32 = 10.0;
    /// Per-axis speed after a serve (pixels per tick)
    pub const BALL_SPEED: f32 = 4.0;

    /// Points needed to win a tournament match
    pub const DEFAULT_WIN_SCORE: u32 = 5;
    /// Score recorded for a match decided by a "wins" button
    pub const DECLARED_WIN_SCORE: u32 = 5;
    pub const DECLARED_LOSS_SCORE: u32 = 3;
}
