//! Scene geometry in arena pixel coordinates
//!
//! Everything is an axis-aligned rectangle: court, centre dashes, paddles,
//! the ball and seven-segment score digits. Origin is the top-left corner,
//! y grows downward.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::sim::{Arena, Side, SimulationState};

/// Vertices per rectangle (two triangles)
pub const RECT_VERTICES: usize = 6;

const DASH_WIDTH: f32 = 2.0;
const DASH_LENGTH: f32 = 10.0;
const DASH_GAP: f32 = 10.0;

const DIGIT_WIDTH: f32 = 20.0;
const DIGIT_HEIGHT: f32 = 36.0;
const DIGIT_STROKE: f32 = 4.0;
const DIGIT_SPACING: f32 = 8.0;
const SCORE_TOP: f32 = 20.0;

/// Segment masks for 0-9, bit 0 = top (a) through bit 6 = middle (g)
const DIGIT_SEGMENTS: [u8; 10] = [0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F];

/// Append a filled rectangle with top-left `min` and bottom-right `max`
pub fn push_rect(out: &mut Vec<Vertex>, min: Vec2, max: Vec2, color: [f32; 4]) {
    out.push(Vertex::new(min.x, min.y, color));
    out.push(Vertex::new(max.x, min.y, color));
    out.push(Vertex::new(min.x, max.y, color));

    out.push(Vertex::new(min.x, max.y, color));
    out.push(Vertex::new(max.x, min.y, color));
    out.push(Vertex::new(max.x, max.y, color));
}

/// Lit segments for a decimal digit (taken modulo 10)
pub fn digit_segments(digit: u32) -> u8 {
    DIGIT_SEGMENTS[(digit % 10) as usize]
}

fn push_digit(out: &mut Vec<Vertex>, origin: Vec2, digit: u32, color: [f32; 4]) {
    let (w, h, t) = (DIGIT_WIDTH, DIGIT_HEIGHT, DIGIT_STROKE);
    let mid = (h - t) / 2.0;
    // (min, max) offsets for segments a..g
    let segments = [
        (Vec2::new(0.0, 0.0), Vec2::new(w, t)),
        (Vec2::new(w - t, 0.0), Vec2::new(w, mid + t)),
        (Vec2::new(w - t, mid), Vec2::new(w, h)),
        (Vec2::new(0.0, h - t), Vec2::new(w, h)),
        (Vec2::new(0.0, mid), Vec2::new(t, h)),
        (Vec2::new(0.0, 0.0), Vec2::new(t, mid + t)),
        (Vec2::new(0.0, mid), Vec2::new(w, mid + t)),
    ];

    let mask = digit_segments(digit);
    for (bit, (min, max)) in segments.iter().enumerate() {
        if mask & (1 << bit) != 0 {
            push_rect(out, origin + *min, origin + *max, color);
        }
    }
}

/// Append `value` centred horizontally on `center_x`
pub fn push_number(out: &mut Vec<Vertex>, value: u32, center_x: f32, top: f32, color: [f32; 4]) {
    let digits: Vec<u32> = value
        .to_string()
        .bytes()
        .map(|b| u32::from(b - b'0'))
        .collect();
    let count = digits.len() as f32;
    let total = count * DIGIT_WIDTH + (count - 1.0) * DIGIT_SPACING;

    let mut x = center_x - total / 2.0;
    for digit in digits {
        push_digit(out, Vec2::new(x, top), digit, color);
        x += DIGIT_WIDTH + DIGIT_SPACING;
    }
}

fn push_center_line(out: &mut Vec<Vertex>, arena: &Arena) {
    let x = arena.width / 2.0 - DASH_WIDTH / 2.0;
    let mut y = 0.0;
    while y < arena.height {
        let end = (y + DASH_LENGTH).min(arena.height);
        push_rect(
            out,
            Vec2::new(x, y),
            Vec2::new(x + DASH_WIDTH, end),
            colors::CENTER_LINE,
        );
        y += DASH_LENGTH + DASH_GAP;
    }
}

/// Full frame for `state`
pub fn build(state: &SimulationState, arena: &Arena) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(64 * RECT_VERTICES);

    push_rect(
        &mut out,
        Vec2::ZERO,
        Vec2::new(arena.width, arena.height),
        colors::BACKGROUND,
    );
    push_center_line(&mut out, arena);

    push_number(&mut out, state.score1, arena.width * 0.25, SCORE_TOP, colors::SCORE);
    push_number(&mut out, state.score2, arena.width * 0.75, SCORE_TOP, colors::SCORE);

    for side in [Side::Left, Side::Right] {
        let x = match side {
            Side::Left => 0.0,
            Side::Right => arena.width - arena.paddle_width,
        };
        let y = state.paddle(side).y;
        push_rect(
            &mut out,
            Vec2::new(x, y),
            Vec2::new(x + arena.paddle_width, y + arena.paddle_height),
            colors::PADDLE,
        );
    }

    let ball = state.ball.pos;
    push_rect(&mut out, ball, ball + Vec2::splat(arena.ball_size), colors::BALL);

    out
}

/// Pixels-per-arena-unit that fits the whole arena in the viewport
fn fit_scale(arena: &Arena, vw: f32, vh: f32) -> f32 {
    (vw / arena.width).min(vh / arena.height)
}

fn viewport_size(viewport: (u32, u32)) -> (f32, f32) {
    (viewport.0.max(1) as f32, viewport.1.max(1) as f32)
}

/// Map an arena point to normalized device coordinates
///
/// The arena is letterboxed into the viewport at its own aspect ratio and the
/// y axis is flipped (NDC y points up).
pub fn arena_to_ndc(point: Vec2, arena: &Arena, viewport: (u32, u32)) -> Vec2 {
    let (vw, vh) = viewport_size(viewport);
    let scale = fit_scale(arena, vw, vh);
    let centered = point - arena.center();
    Vec2::new(
        centered.x * scale * 2.0 / vw,
        -centered.y * scale * 2.0 / vh,
    )
}

/// `arena_to_ndc` as `ndc = position * scale + offset`, uploaded as the
/// shader's view uniform
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ViewTransform {
    pub scale: [f32; 2],
    pub offset: [f32; 2],
}

impl ViewTransform {
    /// Solved from the mapped corners of the arena
    pub fn new(arena: &Arena, viewport: (u32, u32)) -> Self {
        let far = Vec2::new(arena.width, arena.height);
        let offset = arena_to_ndc(Vec2::ZERO, arena, viewport);
        let scale = (arena_to_ndc(far, arena, viewport) - offset) / far;
        Self {
            scale: scale.to_array(),
            offset: offset.to_array(),
        }
    }

    pub fn apply(&self, point: Vec2) -> Vec2 {
        point * Vec2::from(self.scale) + Vec2::from(self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_count(vertices: &[Vertex]) -> usize {
        assert_eq!(vertices.len() % RECT_VERTICES, 0);
        vertices.len() / RECT_VERTICES
    }

    #[test]
    fn test_rect_covers_corners() {
        let mut out = Vec::new();
        push_rect(&mut out, Vec2::new(1.0, 2.0), Vec2::new(3.0, 5.0), colors::BALL);
        assert_eq!(out.len(), RECT_VERTICES);
        let xs: Vec<f32> = out.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = out.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 1.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 3.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 2.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 5.0);
    }

    #[test]
    fn test_digit_segments() {
        assert_eq!(digit_segments(8).count_ones(), 7);
        assert_eq!(digit_segments(1).count_ones(), 2);
        assert_eq!(digit_segments(0).count_ones(), 6);
        // Middle bar only where it belongs
        assert_eq!(digit_segments(0) & 0x40, 0);
        assert_ne!(digit_segments(2) & 0x40, 0);
    }

    #[test]
    fn test_number_layout() {
        let mut one = Vec::new();
        push_number(&mut one, 1, 100.0, 0.0, colors::SCORE);
        assert_eq!(rect_count(&one), 2);

        let mut multi = Vec::new();
        push_number(&mut multi, 88, 100.0, 0.0, colors::SCORE);
        assert_eq!(rect_count(&multi), 14);
        // Centred on x = 100
        let min_x = multi.iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
        let max_x = multi.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        assert!((min_x + max_x - 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_build_frame() {
        let arena = Arena::default();
        let mut state = SimulationState::new(&arena);
        let baseline = rect_count(&build(&state, &arena));

        // Background + 20 dashes + two zeros + paddles + ball
        assert_eq!(baseline, 1 + 20 + 6 + 6 + 2 + 1);

        state.score1 = 1;
        let frame = build(&state, &arena);
        assert_eq!(rect_count(&frame), baseline - 4);

        // The ball is the last rectangle drawn
        let ball = &frame[frame.len() - RECT_VERTICES..];
        assert!(ball.iter().all(|v| v.color == colors::BALL));
        assert_eq!(ball[0].position, [state.ball.pos.x, state.ball.pos.y]);
    }

    #[test]
    fn test_build_does_not_touch_state() {
        let arena = Arena::default();
        let state = SimulationState::new(&arena);
        let before = state.clone();
        let _ = build(&state, &arena);
        assert_eq!(state, before);
    }

    #[test]
    fn test_arena_to_ndc() {
        let arena = Arena::default();
        let viewport = (800, 400);
        assert_eq!(arena_to_ndc(arena.center(), &arena, viewport), Vec2::ZERO);
        assert_eq!(arena_to_ndc(Vec2::ZERO, &arena, viewport), Vec2::new(-1.0, 1.0));
        assert_eq!(
            arena_to_ndc(Vec2::new(800.0, 400.0), &arena, viewport),
            Vec2::new(1.0, -1.0)
        );

        // Square viewport letterboxes vertically
        let top_left = arena_to_ndc(Vec2::ZERO, &arena, (400, 400));
        assert_eq!(top_left, Vec2::new(-1.0, 0.5));
    }

    #[test]
    fn test_view_transform_matches_cpu_mapping() {
        let arena = Arena::default();
        let points = [
            Vec2::ZERO,
            arena.center(),
            Vec2::new(800.0, 400.0),
            Vec2::new(123.0, 321.0),
        ];
        for viewport in [(800, 400), (400, 400), (1920, 1080), (0, 0)] {
            let view = ViewTransform::new(&arena, viewport);
            for p in points {
                let gpu = view.apply(p);
                let cpu = arena_to_ndc(p, &arena, viewport);
                assert!((gpu - cpu).abs().max_element() < 1e-5, "{viewport:?} {p}");
            }
        }
    }

    #[test]
    fn test_view_transform_uniform_layout() {
        // Two vec2<f32> in the shader's View struct
        assert_eq!(std::mem::size_of::<ViewTransform>(), 16);
        let view = ViewTransform::new(&Arena::default(), (800, 400));
        assert_eq!(bytemuck::bytes_of(&view).len(), 16);
    }
}
