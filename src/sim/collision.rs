//! Collision checks for the rectangular court
//!
//! The ball and paddles are axis-aligned boxes, so every check is a plane or
//! interval test. Response (velocity negation, clamping) lives in `tick`.

use super::state::{Arena, Ball, Paddle, Side};

/// Ball touches or passes the top or bottom wall
#[inline]
pub fn touches_wall(ball: &Ball, arena: &Arena) -> bool {
    ball.pos.y <= 0.0 || ball.pos.y >= arena.ball_max_y()
}

/// Ball's left edge is at/behind the left paddle plane while overlapping it
#[inline]
pub fn hits_left_paddle(ball: &Ball, paddle: &Paddle, arena: &Arena) -> bool {
    ball.pos.x <= arena.left_plane() && paddle.overlaps(ball.pos.y, arena)
}

/// Ball is at/past the right paddle plane while overlapping it
#[inline]
pub fn hits_right_paddle(ball: &Ball, paddle: &Paddle, arena: &Arena) -> bool {
    ball.pos.x >= arena.right_plane() && paddle.overlaps(ball.pos.y, arena)
}

/// Side that scores when the ball has left the court horizontally
pub fn scorer(ball: &Ball, arena: &Arena) -> Option<Side> {
    if ball.pos.x < 0.0 {
        Some(Side::Right)
    } else if ball.pos.x > arena.width {
        Some(Side::Left)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn ball_at(x: f32, y: f32) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
        }
    }

    #[test]
    fn test_wall_contact() {
        let arena = Arena::default();
        assert!(touches_wall(&ball_at(100.0, 0.0), &arena));
        assert!(touches_wall(&ball_at(100.0, -2.0), &arena));
        assert!(touches_wall(&ball_at(100.0, 390.0), &arena));
        assert!(!touches_wall(&ball_at(100.0, 389.0), &arena));
        assert!(!touches_wall(&ball_at(100.0, 1.0), &arena));
    }

    #[test]
    fn test_left_paddle_overlap() {
        let arena = Arena::default();
        let paddle = Paddle { y: 100.0 };

        // Ball bottom edge touching paddle top
        assert!(hits_left_paddle(&ball_at(8.0, 90.0), &paddle, &arena));
        // Ball top edge touching paddle bottom
        assert!(hits_left_paddle(&ball_at(10.0, 180.0), &paddle, &arena));
        // Above the paddle
        assert!(!hits_left_paddle(&ball_at(8.0, 89.0), &paddle, &arena));
        // In front of the plane
        assert!(!hits_left_paddle(&ball_at(11.0, 120.0), &paddle, &arena));
    }

    #[test]
    fn test_right_paddle_overlap() {
        let arena = Arena::default();
        let paddle = Paddle { y: 300.0 };
        assert!(hits_right_paddle(&ball_at(780.0, 310.0), &paddle, &arena));
        assert!(!hits_right_paddle(&ball_at(779.0, 310.0), &paddle, &arena));
        assert!(!hits_right_paddle(&ball_at(785.0, 100.0), &paddle, &arena));
    }

    #[test]
    fn test_scorer() {
        let arena = Arena::default();
        assert_eq!(scorer(&ball_at(-0.5, 200.0), &arena), Some(Side::Right));
        assert_eq!(scorer(&ball_at(800.5, 200.0), &arena), Some(Side::Left));
        assert_eq!(scorer(&ball_at(0.0, 200.0), &arena), None);
        assert_eq!(scorer(&ball_at(800.0, 200.0), &arena), None);
    }
}
