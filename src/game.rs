//! Phase owner and the per-frame step
//!
//! Each `step` is one frame: drain queued events into the current phase, run
//! its logic, then render. Events the phases produce go back on the queue and
//! are seen next frame.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::{AudioSink, Sounds};
use crate::events::{EventChannel, EventSender, GameEvent};
use crate::phase::{Phase, PhaseContext, Statistics, Status};
use crate::render::Canvas;
use crate::settings::Settings;

/// The whole game: settings, current phase, event queue and audio
pub struct Game {
    settings: Settings,
    phase: Phase,
    frame: u64,
    channel: EventChannel,
    sounds: Sounds,
    rng: Pcg32,
    outbox: Vec<GameEvent>,
}

impl Game {
    pub fn new(settings: Settings, sink: Box<dyn AudioSink>) -> Self {
        let sounds = Sounds::from_settings(sink, &settings);
        let rng = Pcg32::seed_from_u64(settings.seed);
        log::info!(
            "game created: {} fps, {} lives, seed {:#x}",
            settings.frames_per_second,
            settings.starting_lives,
            settings.seed
        );
        Self {
            settings,
            phase: Phase::default(),
            frame: 0,
            channel: EventChannel::new(),
            sounds,
            rng,
            outbox: Vec::new(),
        }
    }

    /// Producer handle for input and resize notifications
    pub fn sender(&self) -> EventSender {
        self.channel.sender()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Frames stepped so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Round status, once playing
    pub fn status(&self) -> Option<&Status> {
        self.phase.playing().map(|playing| playing.status())
    }

    pub fn statistics(&self) -> Option<&Statistics> {
        self.phase.playing().map(|playing| playing.statistics())
    }

    /// Whether the round has been won or lost
    pub fn is_over(&self) -> bool {
        self.status().is_some_and(Status::is_over)
    }

    /// Run one frame
    pub fn step(&mut self, canvas: &mut dyn Canvas) {
        self.frame += 1;
        let delta_ms = self.settings.delta_ms();

        for event in self.channel.drain() {
            log::trace!("frame {}: {}", self.frame, event.name());
            let mut ctx = PhaseContext {
                frame: self.frame,
                delta_ms,
                settings: &self.settings,
                sounds: &mut self.sounds,
                rng: &mut self.rng,
                out: &mut self.outbox,
            };
            let next = self.phase.on_event(&event, &mut ctx);
            self.flush_outbox();
            if let Some(next) = next {
                self.change_phase(next);
            }
        }

        let mut ctx = PhaseContext {
            frame: self.frame,
            delta_ms,
            settings: &self.settings,
            sounds: &mut self.sounds,
            rng: &mut self.rng,
            out: &mut self.outbox,
        };
        let next = self.phase.on_logic(&mut ctx);
        self.flush_outbox();
        if let Some(next) = next {
            self.change_phase(next);
        }

        self.phase.on_render(self.frame, canvas);
    }

    fn flush_outbox(&mut self) {
        if !self.outbox.is_empty() {
            self.channel.publish(self.outbox.drain(..));
        }
    }

    fn change_phase(&mut self, next: Phase) {
        log::debug!(
            "frame {}: phase {} -> {}",
            self.frame,
            self.phase.name(),
            next.name()
        );
        self.phase = next;
    }
}
