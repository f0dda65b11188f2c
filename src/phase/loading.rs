//! Building the play field for a new round

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::{Phase, PhaseContext, Playing};
use crate::consts::*;
use crate::events::GameEvent;
use crate::render::{Canvas, Color};
use crate::settings::Settings;
use crate::sim::field::FieldOptions;
use crate::sim::{Ball, Block, Circle, Paddle, PlayField, ScreenSize, vectors};

const BACKGROUND: Color = Color::rgb(0x80, 0x00, 0x00);

/// Lay out paddle, block grid and ball for `screen`
///
/// Sizes derive from the screen width: blocks are `w / 13` wide, the ball is
/// `w / 16`. The ball starts one ball-width above the paddle, heading up and
/// slightly right.
pub fn build_field(screen: ScreenSize, settings: &Settings, rng: &mut Pcg32) -> PlayField {
    let block_size = (screen.width / BLOCK_SIZE_DIVISOR).max(1) as f32;
    let ball_size = (screen.width / BALL_SIZE_DIVISOR).max(1) as f32;

    let paddle_height = ball_size / 2.0;
    let paddle = Paddle::new(
        Vec2::new(screen.center_x(), screen.height_f() - paddle_height * 4.0),
        ball_size * 2.0,
        paddle_height / 2.0,
    );

    let mut blocks = Vec::with_capacity(BLOCK_ROWS * BLOCK_COLUMNS);
    for row in 0..BLOCK_ROWS {
        for col in 0..BLOCK_COLUMNS {
            let center = Vec2::new(block_size * (col + 1) as f32, block_size * (row + 1) as f32);
            blocks.push(Block::new(Circle::new(center, block_size / 2.0)));
        }
    }

    let raw = Vec2::new(rng.random::<f32>(), -1.0);
    let direction = vectors::normalize_or(raw, Vec2::NEG_Y);
    let ball_center = Vec2::new(screen.center_x(), paddle.rect().min.y - ball_size);
    let ball = Ball::new(
        Circle::new(ball_center, ball_size / 2.0),
        direction,
        BALL_SPEED_DEFAULT,
    );

    log::info!(
        "play field {}x{}: {} blocks of {block_size}px, ball {ball_size}px",
        screen.width,
        screen.height,
        blocks.len()
    );

    PlayField::new(
        screen,
        blocks,
        ball,
        paddle,
        FieldOptions::from_settings(settings),
        rng.random(),
    )
}

/// Holds the freshly built field until the following logic step
#[derive(Debug)]
pub struct Loading {
    screen: ScreenSize,
    field: Option<PlayField>,
}

impl Loading {
    pub fn new(screen: ScreenSize, settings: &Settings, rng: &mut Pcg32) -> Self {
        Self {
            screen,
            field: Some(build_field(screen, settings, rng)),
        }
    }

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    /// The field, until it has been handed to play
    pub fn field(&self) -> Option<&PlayField> {
        self.field.as_ref()
    }

    pub fn on_event(&mut self, _event: &GameEvent, _ctx: &mut PhaseContext<'_>) -> Option<Phase> {
        None
    }

    pub fn on_logic(&mut self, ctx: &mut PhaseContext<'_>) -> Option<Phase> {
        let field = self.field.take()?;
        Some(Phase::Playing(Playing::new(field, ctx.frame, ctx.settings)))
    }

    pub fn on_render(&self, canvas: &mut dyn Canvas) {
        canvas.fill_background(BACKGROUND);
    }
}
