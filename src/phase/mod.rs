//! Game phase state machine
//!
//! Exactly one phase is current. Each handler returns `Some(next)` to replace
//! the current phase, `None` to stay.
//!
//! ```text
//! Initializing --ScreenResized--> Loading --logic step--> Playing
//! ```

mod initializing;
mod loading;
mod playing;

pub use initializing::Initializing;
pub use loading::{Loading, build_field};
pub use playing::{Announcement, AnnouncementKind, Countdown, Playing, Statistics, Status};

use rand_pcg::Pcg32;

use crate::audio::Sounds;
use crate::events::GameEvent;
use crate::render::Canvas;
use crate::settings::Settings;

/// Everything a phase may touch during one frame
pub struct PhaseContext<'a> {
    /// Frame number, starting at 1 for the first step
    pub frame: u64,
    /// Fixed logic step in milliseconds
    pub delta_ms: f32,
    pub settings: &'a Settings,
    pub sounds: &'a mut Sounds,
    pub rng: &'a mut Pcg32,
    /// Events produced during this stage, queued for the next frame
    pub out: &'a mut Vec<GameEvent>,
}

/// Top-level game mode
#[derive(Debug)]
pub enum Phase {
    Initializing(Initializing),
    Loading(Loading),
    Playing(Playing),
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Initializing(Initializing)
    }
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Initializing(_) => "initializing",
            Phase::Loading(_) => "loading",
            Phase::Playing(_) => "playing",
        }
    }

    pub fn on_event(&mut self, event: &GameEvent, ctx: &mut PhaseContext<'_>) -> Option<Phase> {
        match self {
            Phase::Initializing(phase) => phase.on_event(event, ctx),
            Phase::Loading(phase) => phase.on_event(event, ctx),
            Phase::Playing(phase) => phase.on_event(event, ctx),
        }
    }

    pub fn on_logic(&mut self, ctx: &mut PhaseContext<'_>) -> Option<Phase> {
        match self {
            Phase::Initializing(phase) => phase.on_logic(ctx),
            Phase::Loading(phase) => phase.on_logic(ctx),
            Phase::Playing(phase) => phase.on_logic(ctx),
        }
    }

    pub fn on_render(&self, frame: u64, canvas: &mut dyn Canvas) {
        match self {
            Phase::Initializing(phase) => phase.on_render(canvas),
            Phase::Loading(phase) => phase.on_render(canvas),
            Phase::Playing(phase) => phase.on_render(frame, canvas),
        }
    }

    /// The play state, once the game has reached it
    pub fn playing(&self) -> Option<&Playing> {
        match self {
            Phase::Playing(playing) => Some(playing),
            Phase::Initializing(_) | Phase::Loading(_) => None,
        }
    }
}
