//! Sound effect triggers
//!
//! The core only decides *when* a sound plays. Playback is the host's job,
//! behind `AudioSink`; every call is fire-and-forget.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Block breaks
    BlockBreak,
    /// Ball hits paddle
    Tak,
    /// Ball hits wall
    Bounce,
    /// Ball lost off the bottom
    Failure,
    /// Countdown step
    Ready,
    /// Countdown finished
    Go,
}

/// Host playback backend
pub trait AudioSink {
    /// Start `effect` at `volume` (0.0 - 1.0) and playback `rate` (1.0 = normal)
    fn play(&mut self, effect: SoundEffect, volume: f32, rate: f32);
}

/// Sink that discards every sound
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect, _volume: f32, _rate: f32) {}
}

/// Sink that writes every sound to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32, rate: f32) {
        log::trace!("sound {effect:?} volume={volume:.2} rate={rate:.2}");
    }
}

/// Lowest random playback rate
const RATE_MIN: f32 = 0.75;
/// Width of the random rate range
const RATE_SPREAD: f32 = 1.25;

/// Audio manager for the game
pub struct Sounds {
    sink: Box<dyn AudioSink>,
    rng: Pcg32,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Sounds {
    pub fn new(sink: Box<dyn AudioSink>, seed: u64) -> Self {
        Self {
            sink,
            rng: Pcg32::seed_from_u64(seed),
            master_volume: 1.0,
            sfx_volume: 0.5,
            muted: false,
        }
    }

    /// Audio manager configured from settings
    pub fn from_settings(sink: Box<dyn AudioSink>, settings: &Settings) -> Self {
        let mut sounds = Self::new(sink, settings.seed.wrapping_add(1));
        sounds.set_master_volume(settings.master_volume);
        sounds.set_sfx_volume(settings.sfx_volume);
        sounds.set_muted(settings.muted);
        sounds
    }

    /// Audio manager that plays nothing
    pub fn silent() -> Self {
        Self::new(Box::new(NullAudio), 0)
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play at normal rate
    pub fn play(&mut self, effect: SoundEffect) {
        self.play_at_rate(effect, 1.0);
    }

    /// Play at a random rate in [0.75, 2.0) so repeated hits don't sound identical
    pub fn play_random_rate(&mut self, effect: SoundEffect) {
        let rate = RATE_MIN + self.rng.random::<f32>() * RATE_SPREAD;
        self.play_at_rate(effect, rate);
    }

    fn play_at_rate(&mut self, effect: SoundEffect, rate: f32) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol, rate);
    }
}
