//! Match control
//!
//! Drives one match's simulation at a fixed tick rate and decides when it ends.

pub mod controller;
pub mod timestep;

pub use controller::{FrameReport, MatchController, MatchOutcome, MatchPhase, WinPolicy};
pub use timestep::FixedTimestep;
