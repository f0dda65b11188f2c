//! Waiting for the host to report a drawable surface

use super::{Loading, Phase, PhaseContext};
use crate::events::GameEvent;
use crate::render::{Canvas, Color};
use crate::sim::ScreenSize;

const BACKGROUND: Color = Color::rgb(0x00, 0x30, 0x30);

/// First phase; leaves as soon as the screen size is known
#[derive(Debug, Clone, Copy, Default)]
pub struct Initializing;

impl Initializing {
    pub fn on_event(&mut self, event: &GameEvent, ctx: &mut PhaseContext<'_>) -> Option<Phase> {
        match event {
            GameEvent::ScreenResized { width, height } => {
                let size = ScreenSize::new(*width, *height);
                Some(Phase::Loading(Loading::new(size, ctx.settings, ctx.rng)))
            }
            GameEvent::PointerMoved(_)
            | GameEvent::PointerReleased(_)
            | GameEvent::GetReady
            | GameEvent::Go
            | GameEvent::BallBrokeBlock { .. }
            | GameEvent::BallBouncedPaddle { .. }
            | GameEvent::BallBouncedWall
            | GameEvent::BallFellOut => None,
        }
    }

    pub fn on_logic(&mut self, _ctx: &mut PhaseContext<'_>) -> Option<Phase> {
        None
    }

    pub fn on_render(&self, canvas: &mut dyn Canvas) {
        canvas.fill_background(BACKGROUND);
    }
}
