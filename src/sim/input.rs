//! Held-key input sampling
//!
//! Key-down/key-up events toggle membership in `HeldKeys`; each tick reads a
//! `TickInput` snapshot from it without blocking.

use serde::{Deserialize, Serialize};

/// The fixed key vocabulary: two keys per paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    P1Up,
    P1Down,
    P2Up,
    P2Down,
}

impl Key {
    /// Map a browser `KeyboardEvent.key` value to a game key
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "w" => Some(Key::P1Up),
            "s" => Some(Key::P1Down),
            "arrowup" => Some(Key::P2Up),
            "arrowdown" => Some(Key::P2Down),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Key::P1Up => 0,
            Key::P1Down => 1,
            Key::P2Up => 2,
            Key::P2Down => 3,
        }
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub p1_up: bool,
    pub p1_down: bool,
    pub p2_up: bool,
    pub p2_down: bool,
}

impl TickInput {
    /// Combine two inputs (e.g. a human on one side, autopilot on the other)
    pub fn merge(self, other: TickInput) -> Self {
        Self {
            p1_up: self.p1_up || other.p1_up,
            p1_down: self.p1_down || other.p1_down,
            p2_up: self.p2_up || other.p2_up,
            p2_down: self.p2_down || other.p2_down,
        }
    }
}

/// Currently held keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldKeys {
    held: [bool; 4],
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held[key.index()] = true;
    }

    pub fn release(&mut self, key: Key) {
        self.held[key.index()] = false;
    }

    /// Key-down by event name; unknown keys are ignored
    pub fn press_named(&mut self, name: &str) -> bool {
        match Key::from_name(name) {
            Some(key) => {
                self.press(key);
                true
            }
            None => false,
        }
    }

    /// Key-up by event name; unknown keys are ignored
    pub fn release_named(&mut self, name: &str) -> bool {
        match Key::from_name(name) {
            Some(key) => {
                self.release(key);
                true
            }
            None => false,
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    /// Drop everything (window blur, match teardown)
    pub fn clear(&mut self) {
        self.held = [false; 4];
    }

    /// Snapshot for the next tick
    pub fn sample(&self) -> TickInput {
        TickInput {
            p1_up: self.is_held(Key::P1Up),
            p1_down: self.is_held(Key::P1Down),
            p2_up: self.is_held(Key::P2Up),
            p2_down: self.is_held(Key::P2Down),
        }
    }
}
