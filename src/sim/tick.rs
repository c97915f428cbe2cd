//! Fixed timestep simulation tick
//!
//! Advances paddles and ball by one tick. The order of the phases decides
//! which response wins when several conditions hold at once:
//! paddles, ball motion, wall bounce, left paddle, right paddle, scoring.

use super::collision::{hits_left_paddle, hits_right_paddle, scorer, touches_wall};
use super::input::TickInput;
use super::state::{Arena, Ball, Paddle, Side, SimulationState};

/// What happened during one tick (presentation hooks, never fed back)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// Ball reflected off the top or bottom wall
    pub wall_bounce: bool,
    /// Paddle that returned the ball
    pub paddle_hit: Option<Side>,
    /// Side that scored (ball was re-served)
    pub scored: Option<Side>,
}

/// Advance the match state by one fixed tick
///
/// Total over its inputs: there is no error channel.
pub fn step(state: &mut SimulationState, input: &TickInput, arena: &Arena) -> TickEvents {
    let mut events = TickEvents::default();
    state.ticks += 1;

    move_paddle(&mut state.paddle1, input.p1_up, input.p1_down, arena);
    move_paddle(&mut state.paddle2, input.p2_up, input.p2_down, arena);

    state.ball.pos += state.ball.vel;

    // No position correction: the ball may sit past the wall for one tick
    if touches_wall(&state.ball, arena) {
        state.ball.vel.y = -state.ball.vel.y;
        events.wall_bounce = true;
    }

    if hits_left_paddle(&state.ball, &state.paddle1, arena) {
        state.ball.vel.x = -state.ball.vel.x;
        state.ball.pos.x = arena.left_plane();
        events.paddle_hit = Some(Side::Left);
    }

    if hits_right_paddle(&state.ball, &state.paddle2, arena) {
        state.ball.vel.x = -state.ball.vel.x;
        state.ball.pos.x = arena.right_plane();
        events.paddle_hit = Some(Side::Right);
    }

    if let Some(side) = scorer(&state.ball, arena) {
        match side {
            Side::Left => state.score1 += 1,
            Side::Right => state.score2 += 1,
        }
        // Re-serve from the centre toward the player who just scored
        state.ball = Ball::serve(arena, side);
        events.scored = Some(side);
        log::debug!(
            "{:?} scored at tick {} ({}-{})",
            side,
            state.ticks,
            state.score1,
            state.score2
        );
    }

    events
}

/// Pure form of `step`: returns the next state, leaving `state` untouched
pub fn stepped(state: &SimulationState, input: &TickInput, arena: &Arena) -> SimulationState {
    let mut next = state.clone();
    step(&mut next, input, arena);
    next
}

fn move_paddle(paddle: &mut Paddle, up: bool, down: bool, arena: &Arena) {
    if up && paddle.y > 0.0 {
        paddle.shift(-arena.paddle_speed, arena);
    }
    if down && paddle.y < arena.paddle_max_y() {
        paddle.shift(arena.paddle_speed, arena);
    }
}
