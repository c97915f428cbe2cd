//! Deterministic simulation module
//!
//! All match physics lives here. This module must be pure and deterministic:
//! - Fixed tick only (no wall-clock reads)
//! - No hidden randomness
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use input::{HeldKeys, Key, TickInput};
pub use state::{Arena, Ball, Paddle, Side, SimulationState};
pub use tick::{TickEvents, step, stepped};
