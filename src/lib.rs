//! Breakout - a single-screen ball, paddle and blocks arcade game
//!
//! Core modules:
//! - `sim`: Play field simulation (vector math, geometry, entities, collisions)
//! - `phase`: Game phase state machine (initializing, loading, playing)
//! - `events`: Domain events and the thread-safe event queue
//! - `game`: Phase owner that runs one frame at a time
//! - `runner`: Fixed-rate loop with a shutdown flag
//! - `render` / `audio`: Abstract sinks implemented by the host
//! - `settings`: Data-driven configuration

pub mod audio;
pub mod events;
pub mod game;
pub mod phase;
pub mod render;
pub mod runner;
pub mod settings;
pub mod sim;

pub use events::{EventChannel, EventSender, GameEvent};
pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Nominal logic rate
    pub const FRAMES_PER_SECOND: u32 = 60;

    /// Block grid (fixed layout)
    pub const BLOCK_ROWS: usize = 6;
    pub const BLOCK_COLUMNS: usize = 12;
    /// Screen width divided by this gives the block sprite size
    pub const BLOCK_SIZE_DIVISOR: u32 = 13;
    /// Screen width divided by this gives the ball sprite size
    pub const BALL_SIZE_DIVISOR: u32 = 16;

    /// Ball speed in pixels per millisecond
    pub const BALL_SPEED_DEFAULT: f32 = 1.0;
    /// Multiplicative speed-up on every broken block
    pub const BALL_SPEED_GROWTH: f32 = 1.025;
    pub const BALL_MAX_SPEED: f32 = 5.0;

    /// Spark defaults
    pub const SPARK_GRAVITY: f32 = 0.01;
    pub const SPARK_LIFE_FRAMES: u32 = 30;
    pub const SPARK_MAX_SPEED: f32 = 8.0;
    pub const BLOCK_SPARK_COUNT: usize = 60;
    pub const BLOCK_SPARK_RADIUS: f32 = 4.0;
    pub const PADDLE_SPARK_COUNT: usize = 10;
    pub const PADDLE_SPARK_RADIUS: f32 = 2.0;

    /// Debug overlays
    pub const CURSOR_RADIUS: f32 = 8.0;
    pub const DEBUG_LINE_LENGTH: f32 = 128.0;
}

/// Milliseconds per logic step at the given frame rate
#[inline]
pub fn frame_delta_ms(frames_per_second: u32) -> f32 {
    1000.0 / frames_per_second.max(1) as f32
}
