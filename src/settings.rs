//! Game settings and preferences
//!
//! Loaded from an optional JSON file; every field falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::FRAMES_PER_SECOND;

/// Longest accepted get-ready delay (five minutes at the nominal rate)
pub const MAX_GET_READY_DELAY_FRAMES: u64 = FRAMES_PER_SECOND as u64 * 60 * 5;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timing ===
    /// Logic steps per second (also paces the countdown)
    pub frames_per_second: u32,

    // === Rules ===
    /// Lives at the start of a round
    pub starting_lives: u32,
    /// Frames between entering play and the first countdown step
    pub get_ready_delay_frames: u64,
    /// Seed for ball direction, spark bursts and sound rates
    pub seed: u64,

    // === Debug ===
    /// Paddle follows the ball on its own
    pub auto_play: bool,
    /// Outline ball and block hulls
    pub debug_hulls: bool,
    /// Draw the last bounce normal and reflection
    pub debug_bounce: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frames_per_second: FRAMES_PER_SECOND,

            starting_lives: 3,
            get_ready_delay_frames: 10,
            seed: 0x0b12_ea47,

            auto_play: false,
            debug_hulls: false,
            debug_bounce: false,

            master_volume: 1.0,
            sfx_volume: 0.5,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a file, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Invalid settings in {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("Cannot read {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Milliseconds per logic step
    pub fn delta_ms(&self) -> f32 {
        crate::frame_delta_ms(self.frames_per_second)
    }

    /// Clamp out-of-range values into something playable
    fn sanitized(mut self) -> Self {
        if self.frames_per_second == 0 {
            log::warn!("frames_per_second must be positive, using {FRAMES_PER_SECOND}");
            self.frames_per_second = FRAMES_PER_SECOND;
        }
        if self.starting_lives == 0 {
            log::warn!("starting_lives must be positive, using 1");
            self.starting_lives = 1;
        }
        if self.get_ready_delay_frames > MAX_GET_READY_DELAY_FRAMES {
            log::warn!(
                "get_ready_delay_frames {} is too long, using {MAX_GET_READY_DELAY_FRAMES}",
                self.get_ready_delay_frames
            );
            self.get_ready_delay_frames = MAX_GET_READY_DELAY_FRAMES;
        }
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }
}
