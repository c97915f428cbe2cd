//! Fixed timestep accumulator
//!
//! Decouples simulation rate from display refresh: frame deltas go in,
//! whole ticks come out.

use crate::consts::MAX_FRAME_DT;

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    tick_rate: u32,
    dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(tick_rate: u32) -> Self {
        let tick_rate = tick_rate.max(1);
        Self {
            tick_rate,
            dt: 1.0 / tick_rate as f32,
            accumulator: 0.0,
        }
    }

    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Add a frame delta (seconds); long stalls are clamped
    pub fn accumulate(&mut self, delta: f32) {
        self.accumulator += delta.clamp(0.0, MAX_FRAME_DT);
    }

    pub fn consume_tick(&mut self) -> bool {
        if self.accumulator >= self.dt {
            self.accumulator -= self.dt;
            true
        } else {
            false
        }
    }

    /// Fraction of a tick left over (for interpolation)
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
