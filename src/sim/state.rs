//! Simulation state and arena geometry
//!
//! Everything a match needs to resume lives in `SimulationState`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// One of the two players in a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Left paddle (W/S)
    Left,
    /// Right paddle (arrow keys)
    Right,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Fixed playing field geometry and tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub ball_size: f32,
    pub ball_speed: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            ball_size: BALL_SIZE,
            ball_speed: BALL_SPEED,
        }
    }
}

impl Arena {
    /// Largest legal paddle `y`
    #[inline]
    pub fn paddle_max_y(&self) -> f32 {
        self.height - self.paddle_height
    }

    /// Largest ball `y` before the bottom wall reflects it
    #[inline]
    pub fn ball_max_y(&self) -> f32 {
        self.height - self.ball_size
    }

    /// x-plane the ball's left edge is checked against for the left paddle
    #[inline]
    pub fn left_plane(&self) -> f32 {
        self.paddle_width
    }

    /// x-plane the ball's left edge is checked against for the right paddle
    #[inline]
    pub fn right_plane(&self) -> f32 {
        self.width - self.paddle_width - self.ball_size
    }

    /// Serve position (ball top-left corner at the arena centre)
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// The ball: `pos` is its top-left corner, `vel` is pixels per tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Ball {
    /// Ball at the centre heading toward `toward` (always moving down first)
    pub fn serve(arena: &Arena, toward: Side) -> Self {
        let vx = match toward {
            Side::Left => -arena.ball_speed,
            Side::Right => arena.ball_speed,
        };
        Self {
            pos: arena.center(),
            vel: Vec2::new(vx, arena.ball_speed),
        }
    }
}

/// A paddle; its x position is fixed by the arena
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub y: f32,
}

impl Paddle {
    pub fn centered(arena: &Arena) -> Self {
        Self {
            y: arena.height / 2.0 - arena.paddle_height / 2.0,
        }
    }

    /// Move by `dy` and clamp into the arena
    pub fn shift(&mut self, dy: f32, arena: &Arena) {
        self.y = (self.y + dy).clamp(0.0, arena.paddle_max_y());
    }

    /// Vertical overlap with a ball whose top edge is at `ball_y`
    #[inline]
    pub fn overlaps(&self, ball_y: f32, arena: &Arena) -> bool {
        ball_y + arena.ball_size >= self.y && ball_y <= self.y + arena.paddle_height
    }
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub ball: Ball,
    pub paddle1: Paddle,
    pub paddle2: Paddle,
    pub score1: u32,
    pub score2: u32,
    /// Simulation tick counter
    pub ticks: u64,
}

impl SimulationState {
    /// Fresh 0-0 state: paddles centred, ball served toward the right
    pub fn new(arena: &Arena) -> Self {
        Self {
            ball: Ball::serve(arena, Side::Right),
            paddle1: Paddle::centered(arena),
            paddle2: Paddle::centered(arena),
            score1: 0,
            score2: 0,
            ticks: 0,
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.paddle1,
            Side::Right => &self.paddle2,
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.score1,
            Side::Right => self.score2,
        }
    }

    /// Side currently ahead, `None` when level
    pub fn leader(&self) -> Option<Side> {
        match self.score1.cmp(&self.score2) {
            std::cmp::Ordering::Greater => Some(Side::Left),
            std::cmp::Ordering::Less => Some(Side::Right),
            std::cmp::Ordering::Equal => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_centered() {
        let arena = Arena::default();
        let state = SimulationState::new(&arena);
        assert_eq!(state.ball.pos, Vec2::new(400.0, 200.0));
        assert_eq!(state.ball.vel, Vec2::new(4.0, 4.0));
        assert_eq!(state.paddle1.y, 160.0);
        assert_eq!(state.paddle2.y, 160.0);
        assert_eq!((state.score1, state.score2), (0, 0));
        assert_eq!(state.leader(), None);
    }

    #[test]
    fn test_paddle_shift_clamps() {
        let arena = Arena::default();
        let mut paddle = Paddle { y: 2.0 };
        paddle.shift(-arena.paddle_speed, &arena);
        assert_eq!(paddle.y, 0.0);

        paddle.y = arena.paddle_max_y() - 1.0;
        paddle.shift(arena.paddle_speed, &arena);
        assert_eq!(paddle.y, arena.paddle_max_y());
    }

    #[test]
    fn test_arena_planes() {
        let arena = Arena::default();
        assert_eq!(arena.left_plane(), 10.0);
        assert_eq!(arena.right_plane(), 780.0);
        assert_eq!(arena.ball_max_y(), 390.0);
        assert_eq!(arena.paddle_max_y(), 320.0);
    }

    #[test]
    fn test_serve_direction() {
        let arena = Arena::default();
        assert!(Ball::serve(&arena, Side::Left).vel.x < 0.0);
        assert!(Ball::serve(&arena, Side::Right).vel.x > 0.0);
        assert_eq!(Side::Left.opponent(), Side::Right);
    }
}
