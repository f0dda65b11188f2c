//! Fixed-rate driver for `Game::step`
//!
//! One step per tick, sleeping off whatever is left of the tick. A slow frame
//! just skips the sleep; there is no catch-up since physics uses a constant
//! step.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::game::Game;
use crate::render::Canvas;

/// Runs a game until asked to stop
#[derive(Debug, Clone)]
pub struct GameLoop {
    tick: Duration,
    shutdown: Arc<AtomicBool>,
}

impl GameLoop {
    /// Loop paced at `frames_per_second`
    pub fn new(frames_per_second: u32) -> Self {
        let tick = Duration::from_nanos(1_000_000_000 / u64::from(frames_per_second.max(1)));
        Self::with_tick(tick)
    }

    /// Loop that steps as fast as it can (headless runs)
    pub fn unpaced() -> Self {
        Self::with_tick(Duration::ZERO)
    }

    fn with_tick(tick: Duration) -> Self {
        Self {
            tick,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Flag that stops the loop before its next frame once set
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
    }

    /// Step until shut down. Returns the number of frames run.
    pub fn run(&self, game: &mut Game, canvas: &mut dyn Canvas) -> u64 {
        self.run_while(game, canvas, |_| true)
    }

    /// Step until shut down or `keep_going` returns false after a frame
    pub fn run_while<F>(&self, game: &mut Game, canvas: &mut dyn Canvas, mut keep_going: F) -> u64
    where
        F: FnMut(&Game) -> bool,
    {
        let mut frames = 0;
        while !self.shutdown.load(Ordering::Acquire) {
            let started = Instant::now();
            game.step(canvas);
            frames += 1;

            if !keep_going(game) {
                break;
            }

            let elapsed = started.elapsed();
            match self.tick.checked_sub(elapsed) {
                Some(rest) if !rest.is_zero() => thread::sleep(rest),
                Some(_) => {}
                None => log::trace!("frame {} overran by {:?}", game.frame(), elapsed - self.tick),
            }
        }
        log::debug!("game loop stopped after {frames} frames");
        frames
    }
}
