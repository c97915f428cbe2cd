//! Rendering
//!
//! Renderers only read the simulation: a sink gets the state by shared
//! reference once per frame and has no way to feed anything back.

pub mod pipeline;
pub mod scene;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;

use crate::sim::{Arena, SimulationState};

/// Anything that can present a frame of the match
pub trait RenderSink {
    fn draw(&mut self, state: &SimulationState, arena: &Arena);
}

/// Headless sink that keeps the last frame's geometry
#[derive(Debug, Default)]
pub struct VertexRecorder {
    pub frames: u64,
    pub last: Vec<Vertex>,
}

impl VertexRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSink for VertexRecorder {
    fn draw(&mut self, state: &SimulationState, arena: &Arena) {
        self.last = scene::build(state, arena);
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_counts_frames() {
        let arena = Arena::default();
        let state = SimulationState::new(&arena);
        let mut sink = VertexRecorder::new();
        sink.draw(&state, &arena);
        sink.draw(&state, &arena);
        assert_eq!(sink.frames, 2);
        assert_eq!(sink.last, scene::build(&state, &arena));
    }
}
