//! CPU paddle driver for demo mode and headless matches
//!
//! Produces the same held-key input a human would, so the simulation cannot
//! tell the difference. A paddle is faster than the ball, so a driver that
//! reacts every tick never misses; `skill` limits how many ticks out of ten
//! it gets to react on.

use super::input::TickInput;
use super::state::{Arena, Side, SimulationState};

/// Ticks per skill window
const SKILL_WINDOW: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Autopilot {
    pub side: Side,
    /// Reacting ticks out of every ten (10 = flawless)
    pub skill: u8,
}

impl Autopilot {
    pub fn new(side: Side, skill: u8) -> Self {
        Self {
            side,
            skill: skill.min(SKILL_WINDOW as u8),
        }
    }

    /// Input for this driver's paddle only
    pub fn drive(&self, state: &SimulationState, arena: &Arena) -> TickInput {
        if state.ticks % SKILL_WINDOW >= u64::from(self.skill) {
            return TickInput::default();
        }

        let ball = &state.ball;
        let approaching = match self.side {
            Side::Left => ball.vel.x < 0.0,
            Side::Right => ball.vel.x > 0.0,
        };
        // Track the ball while it comes in, otherwise drift back to the middle
        let target = if approaching {
            ball.pos.y + arena.ball_size / 2.0
        } else {
            arena.height / 2.0
        };
        let center = state.paddle(self.side).y + arena.paddle_height / 2.0;
        let dead_zone = arena.paddle_speed;

        let up = target < center - dead_zone;
        let down = target > center + dead_zone;
        match self.side {
            Side::Left => TickInput {
                p1_up: up,
                p1_down: down,
                ..Default::default()
            },
            Side::Right => TickInput {
                p2_up: up,
                p2_down: down,
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::step;
    use glam::Vec2;

    #[test]
    fn test_tracks_incoming_ball() {
        let arena = Arena::default();
        let mut state = SimulationState::new(&arena);
        state.ball.pos = Vec2::new(200.0, 20.0);
        state.ball.vel = Vec2::new(-4.0, 4.0);

        let pilot = Autopilot::new(Side::Left, 10);
        let input = pilot.drive(&state, &arena);
        assert!(input.p1_up);
        assert!(!input.p1_down && !input.p2_up && !input.p2_down);
    }

    #[test]
    fn test_recenters_when_ball_leaves() {
        let arena = Arena::default();
        let mut state = SimulationState::new(&arena);
        state.paddle2.y = 0.0;
        state.ball.vel = Vec2::new(-4.0, 4.0);

        let input = Autopilot::new(Side::Right, 10).drive(&state, &arena);
        assert!(input.p2_down);
    }

    #[test]
    fn test_zero_skill_never_moves() {
        let arena = Arena::default();
        let mut state = SimulationState::new(&arena);
        state.ball.pos.y = 0.0;
        let pilot = Autopilot::new(Side::Right, 0);
        for _ in 0..20 {
            assert_eq!(pilot.drive(&state, &arena), TickInput::default());
            state.ticks += 1;
        }
    }

    #[test]
    fn test_flawless_pair_keeps_rally_alive() {
        let arena = Arena::default();
        let mut state = SimulationState::new(&arena);
        let left = Autopilot::new(Side::Left, 10);
        let right = Autopilot::new(Side::Right, 10);

        for _ in 0..5_000 {
            let input = left.drive(&state, &arena).merge(right.drive(&state, &arena));
            step(&mut state, &input, &arena);
        }
        assert_eq!((state.score1, state.score2), (0, 0));
    }

    #[test]
    fn test_weak_side_concedes() {
        let arena = Arena::default();
        let mut state = SimulationState::new(&arena);
        let left = Autopilot::new(Side::Left, 9);
        let right = Autopilot::new(Side::Right, 5);

        while state.score1 < 5 && state.ticks < 36_000 {
            let input = left.drive(&state, &arena).merge(right.drive(&state, &arena));
            step(&mut state, &input, &arena);
        }
        assert_eq!((state.score1, state.score2), (5, 0));
    }
}
