//! Match lifecycle: idle -> running -> finished
//!
//! The controller is the single owner of a match's `SimulationState`. It
//! steps the simulation at a fixed rate and applies the win policy; the
//! simulation itself never decides when a match is over.

use serde::{Deserialize, Serialize};

use super::timestep::FixedTimestep;
use crate::consts::{MAX_SUBSTEPS, TICK_RATE_HZ};
use crate::error::MatchError;
use crate::sim::{Arena, Side, SimulationState, TickEvents, TickInput, step};

/// Where a match is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Created, waiting for `start`
    Idle,
    /// Ticking every frame
    Running,
    /// Final score frozen
    Finished,
}

/// When a running match ends on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WinPolicy {
    /// Never: only an external `finish` ends the match
    #[default]
    Endless,
    /// First side to reach this many points wins; `FirstTo(0)` never decides
    FirstTo(u32),
}

impl WinPolicy {
    /// Winner under this policy, if the match is decided
    pub fn decided(&self, state: &SimulationState) -> Option<Side> {
        match *self {
            WinPolicy::Endless => None,
            WinPolicy::FirstTo(0) => None,
            WinPolicy::FirstTo(target) => {
                if state.score1 >= target {
                    Some(Side::Left)
                } else if state.score2 >= target {
                    Some(Side::Right)
                } else {
                    None
                }
            }
        }
    }
}

/// Final result of a finished match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub score1: u32,
    pub score2: u32,
    /// `None` for a level score at an external stop
    pub winner: Option<Side>,
    pub ticks: u64,
    /// Unix timestamp (ms)
    pub started_at_ms: f64,
    /// Unix timestamp (ms)
    pub finished_at_ms: f64,
}

/// Summary of one `advance` call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Simulation ticks executed
    pub ticks: u32,
    pub wall_bounces: u32,
    pub paddle_hits: u32,
    /// Scorers, in tick order
    pub scored: Vec<Side>,
    /// Match finished during this frame
    pub finished: bool,
}

impl FrameReport {
    fn record(&mut self, events: &TickEvents) {
        self.ticks += 1;
        if events.wall_bounce {
            self.wall_bounces += 1;
        }
        if events.paddle_hit.is_some() {
            self.paddle_hits += 1;
        }
        if let Some(side) = events.scored {
            self.scored.push(side);
        }
    }
}

/// Owns and drives a single match
#[derive(Debug, Clone)]
pub struct MatchController {
    arena: Arena,
    policy: WinPolicy,
    phase: MatchPhase,
    state: SimulationState,
    timestep: FixedTimestep,
    started_at_ms: f64,
    outcome: Option<MatchOutcome>,
}

impl MatchController {
    pub fn new(arena: Arena, policy: WinPolicy) -> Self {
        Self {
            arena,
            policy,
            phase: MatchPhase::Idle,
            state: SimulationState::new(&arena),
            timestep: FixedTimestep::new(TICK_RATE_HZ),
            started_at_ms: 0.0,
            outcome: None,
        }
    }

    /// Override the simulation rate (default 60 Hz)
    pub fn with_tick_rate(mut self, hz: u32) -> Self {
        self.timestep = FixedTimestep::new(hz);
        self
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn policy(&self) -> WinPolicy {
        self.policy
    }

    pub fn tick_rate(&self) -> u32 {
        self.timestep.tick_rate()
    }

    /// Final result, once finished
    pub fn result(&self) -> Option<&MatchOutcome> {
        self.outcome.as_ref()
    }

    /// Idle -> Running: fresh 0-0 state, start time recorded
    pub fn start(&mut self, now_ms: f64) -> Result<(), MatchError> {
        if self.phase != MatchPhase::Idle {
            return Err(MatchError::InvalidTransition {
                from: self.phase,
                action: "start",
            });
        }
        self.state = SimulationState::new(&self.arena);
        self.timestep.reset();
        self.started_at_ms = now_ms;
        self.outcome = None;
        self.phase = MatchPhase::Running;
        log::info!("Match started ({:?})", self.policy);
        Ok(())
    }

    /// Run as many fixed ticks as `frame_dt` covers with one held-key sample
    pub fn advance(&mut self, frame_dt: f32, input: &TickInput) -> FrameReport {
        let input = *input;
        self.advance_with(frame_dt, |_| input)
    }

    /// Like `advance`, sampling input before every tick
    pub fn advance_with<F>(&mut self, frame_dt: f32, mut sample: F) -> FrameReport
    where
        F: FnMut(&SimulationState) -> TickInput,
    {
        let mut report = FrameReport::default();
        if self.phase != MatchPhase::Running {
            return report;
        }

        self.timestep.accumulate(frame_dt);
        let mut substeps = 0;
        while substeps < MAX_SUBSTEPS && self.timestep.consume_tick() {
            let input = sample(&self.state);
            let events = step(&mut self.state, &input, &self.arena);
            report.record(&events);
            substeps += 1;

            if let Some(winner) = self.policy.decided(&self.state) {
                let elapsed_ms = self.state.ticks as f64 * f64::from(self.timestep.dt()) * 1000.0;
                self.complete(self.started_at_ms + elapsed_ms, Some(winner));
                report.finished = true;
                break;
            }
        }
        report
    }

    /// Running -> Finished on an external decision (manual stop, time limit)
    pub fn finish(&mut self, now_ms: f64) -> Result<MatchOutcome, MatchError> {
        if self.phase != MatchPhase::Running {
            return Err(MatchError::InvalidTransition {
                from: self.phase,
                action: "finish",
            });
        }
        let winner = self.state.leader();
        Ok(self.complete(now_ms, winner))
    }

    /// Back to Idle with a fresh state
    pub fn reset(&mut self) {
        self.phase = MatchPhase::Idle;
        self.state = SimulationState::new(&self.arena);
        self.timestep.reset();
        self.started_at_ms = 0.0;
        self.outcome = None;
    }

    fn complete(&mut self, now_ms: f64, winner: Option<Side>) -> MatchOutcome {
        let outcome = MatchOutcome {
            score1: self.state.score1,
            score2: self.state.score2,
            winner,
            ticks: self.state.ticks,
            started_at_ms: self.started_at_ms,
            finished_at_ms: now_ms,
        };
        self.phase = MatchPhase::Finished;
        self.outcome = Some(outcome.clone());
        log::info!(
            "Match finished {}-{} after {} ticks (winner: {:?})",
            outcome.score1,
            outcome.score2,
            outcome.ticks,
            outcome.winner
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::Autopilot;

    #[test]
    fn test_lifecycle() {
        let mut ctl = MatchController::new(Arena::default(), WinPolicy::Endless);
        assert_eq!(ctl.phase(), MatchPhase::Idle);

        // Idle matches don't tick
        let report = ctl.advance(SIM_DT, &TickInput::default());
        assert_eq!(report.ticks, 0);

        ctl.start(1_000.0).unwrap();
        assert_eq!(ctl.phase(), MatchPhase::Running);
        assert!(ctl.start(1_000.0).is_err());

        let report = ctl.advance(SIM_DT, &TickInput::default());
        assert_eq!(report.ticks, 1);
        assert_eq!(ctl.state().ticks, 1);

        let outcome = ctl.finish(2_000.0).unwrap();
        assert_eq!(ctl.phase(), MatchPhase::Finished);
        assert_eq!(outcome.started_at_ms, 1_000.0);
        assert_eq!(outcome.finished_at_ms, 2_000.0);
        assert_eq!(outcome.winner, None);
        assert_eq!(ctl.result(), Some(&outcome));

        // Finished matches are frozen
        assert_eq!(ctl.advance(SIM_DT, &TickInput::default()).ticks, 0);
        assert!(matches!(
            ctl.finish(3_000.0),
            Err(MatchError::InvalidTransition {
                from: MatchPhase::Finished,
                ..
            })
        ));

        ctl.reset();
        assert_eq!(ctl.phase(), MatchPhase::Idle);
        assert!(ctl.result().is_none());
        assert_eq!(ctl.state().ticks, 0);
    }

    #[test]
    fn test_finish_requires_running() {
        let mut ctl = MatchController::new(Arena::default(), WinPolicy::Endless);
        assert!(ctl.finish(0.0).is_err());
    }

    #[test]
    fn test_substep_cap() {
        let mut ctl = MatchController::new(Arena::default(), WinPolicy::Endless).with_tick_rate(1_000);
        ctl.start(0.0).unwrap();
        let report = ctl.advance(0.1, &TickInput::default());
        assert_eq!(report.ticks, MAX_SUBSTEPS);
    }

    #[test]
    fn test_endless_never_finishes() {
        let mut ctl = MatchController::new(Arena::default(), WinPolicy::Endless);
        ctl.start(0.0).unwrap();
        // Left paddle parked at the top: points are scored but the match keeps running
        let parked = TickInput {
            p1_up: true,
            ..Default::default()
        };
        for _ in 0..3_000 {
            ctl.advance(SIM_DT, &parked);
        }
        assert_eq!(ctl.phase(), MatchPhase::Running);
        assert!(ctl.state().score2 > 0);
    }

    #[test]
    fn test_first_to_policy_finishes() {
        let mut ctl = MatchController::new(Arena::default(), WinPolicy::FirstTo(3));
        ctl.start(0.0).unwrap();
        let left = Autopilot::new(Side::Left, 10);

        let mut frames = 0;
        while ctl.phase() == MatchPhase::Running && frames < 50_000 {
            ctl.advance_with(SIM_DT, |state| left.drive(state, &Arena::default()));
            frames += 1;
        }

        let outcome = ctl.result().unwrap();
        assert_eq!(outcome.winner, Some(Side::Left));
        assert_eq!(outcome.score1, 3);
        assert_eq!(outcome.score2, 0);
        assert!(outcome.finished_at_ms > outcome.started_at_ms);
    }

    #[test]
    fn test_restart_resets_score() {
        let mut ctl = MatchController::new(Arena::default(), WinPolicy::Endless);
        ctl.start(0.0).unwrap();
        for _ in 0..1_000 {
            ctl.advance(SIM_DT, &TickInput::default());
        }
        ctl.finish(1.0).unwrap();
        ctl.reset();
        ctl.start(2.0).unwrap();
        assert_eq!((ctl.state().score1, ctl.state().score2), (0, 0));
    }

    #[test]
    fn test_policy_decided() {
        let arena = Arena::default();
        let mut state = SimulationState::new(&arena);
        assert_eq!(WinPolicy::FirstTo(2).decided(&state), None);
        state.score2 = 2;
        assert_eq!(WinPolicy::FirstTo(2).decided(&state), Some(Side::Right));
        assert_eq!(WinPolicy::Endless.decided(&state), None);
    }

    #[test]
    fn test_zero_target_runs_like_endless() {
        let arena = Arena::default();
        let state = SimulationState::new(&arena);
        assert_eq!(WinPolicy::FirstTo(0).decided(&state), None);

        let mut ctl = MatchController::new(arena, WinPolicy::FirstTo(0));
        ctl.start(0.0).unwrap();
        let report = ctl.advance(SIM_DT, &TickInput::default());
        assert_eq!(report.ticks, 1);
        assert!(!report.finished);
        assert_eq!(ctl.phase(), MatchPhase::Running);
        assert!(ctl.result().is_none());
    }
}
