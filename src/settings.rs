//! Game settings and preferences
//!
//! Persisted as JSON: LocalStorage in the browser, a file on native.
//! Unreadable settings never block play; they fall back to defaults.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_WIN_SCORE, TICK_RATE_HZ};
use crate::game::WinPolicy;
use crate::sim::Arena;

/// Highest tick rate accepted from settings
pub const MAX_TICK_RATE: u32 = 240;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Match ===
    /// Points to win a match; `None` plays until stopped
    pub win_score: Option<u32>,
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Court and object geometry
    pub arena: Arena,

    // === Players ===
    /// CPU drives the right paddle in a local match
    pub p2_autopilot: bool,
    /// CPU reaction (0-10)
    pub autopilot_skill: u8,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (no score flash)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            win_score: Some(DEFAULT_WIN_SCORE),
            tick_rate: TICK_RATE_HZ,
            arena: Arena::default(),

            p2_autopilot: false,
            autopilot_skill: 7,

            show_fps: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Win policy for new matches
    pub fn win_policy(&self) -> WinPolicy {
        match self.win_score {
            Some(target) if target > 0 => WinPolicy::FirstTo(target),
            _ => WinPolicy::Endless,
        }
    }

    /// Clamp out-of-range values from hand-edited or stale JSON
    pub fn sanitized(mut self) -> Self {
        self.tick_rate = self.tick_rate.clamp(1, MAX_TICK_RATE);
        self.autopilot_skill = self.autopilot_skill.min(10);
        if self.arena.width <= 0.0 || self.arena.height <= 0.0 {
            log::warn!("Ignoring invalid arena geometry");
            self.arena = Arena::default();
        }
        self
    }

    /// Parse settings JSON; missing fields take defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse, or fall back to defaults with a warning
    pub fn from_json_or_default(json: &str) -> Self {
        Self::from_json(json).unwrap_or_else(|e| {
            log::warn!("Invalid settings JSON ({e}), using defaults");
            Self::default()
        })
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "pong_tournament_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json_or_default(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Default settings file for native runs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> std::path::PathBuf {
        std::path::PathBuf::from(format!("{}.json", Self::STORAGE_KEY))
    }

    /// Load settings from a JSON file; a missing file means defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json_or_default(&json)
            }
            Err(e) => {
                log::info!("Using default settings ({}: {e})", path.display());
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        if let Err(e) = self.save_to(&Self::default_path()) {
            log::warn!("Failed to save settings: {e}");
        }
    }
}
