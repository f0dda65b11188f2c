//! Play field simulation
//!
//! One `PlayField` exists per round. `on_logic` advances it by one fixed step
//! in a fixed stage order (paddle, ball, sparks, walls, blocks, paddle
//! bounce); every stage is the only writer of the entity it touches. Events
//! come out through the caller's outbox, never through callbacks.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{circle_contact_point, circle_in_rect};
use super::explosion::Explosion;
use super::geometry::ScreenSize;
use super::state::{Ball, Block, Paddle};
use super::vectors;
use crate::consts::*;
use crate::events::GameEvent;
use crate::render::{Canvas, Color, Sprite, Style};
use crate::settings::Settings;

/// Debug and assist switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldOptions {
    /// Paddle snaps under the ball
    pub auto_play: bool,
    pub debug_hulls: bool,
    pub debug_bounce: bool,
}

impl FieldOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            auto_play: settings.auto_play,
            debug_hulls: settings.debug_hulls,
            debug_bounce: settings.debug_bounce,
        }
    }
}

/// Geometry of the most recent block or paddle bounce
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounce {
    pub point: Vec2,
    pub normal: Vec2,
    pub reflect: Vec2,
}

/// The arena for one round
#[derive(Debug, Clone)]
pub struct PlayField {
    pub screen: ScreenSize,
    /// Grid order is the collision tie-break order
    pub blocks: Vec<Block>,
    pub ball: Ball,
    pub paddle: Paddle,
    /// Active spark bursts (visual only)
    pub explosions: Vec<Explosion>,
    options: FieldOptions,
    rng: Pcg32,
    cursor_down: bool,
    cursor: Vec2,
    last_bounce: Option<Bounce>,
}

impl PlayField {
    pub fn new(
        screen: ScreenSize,
        blocks: Vec<Block>,
        ball: Ball,
        paddle: Paddle,
        options: FieldOptions,
        seed: u64,
    ) -> Self {
        let cursor = paddle.center;
        Self {
            screen,
            blocks,
            ball,
            paddle,
            explosions: Vec::new(),
            options,
            rng: Pcg32::seed_from_u64(seed),
            cursor_down: false,
            cursor,
            last_bounce: None,
        }
    }

    pub fn options(&self) -> FieldOptions {
        self.options
    }

    pub fn set_options(&mut self, options: FieldOptions) {
        self.options = options;
    }

    /// Whether the pointer is currently held down
    pub fn cursor_down(&self) -> bool {
        self.cursor_down
    }

    /// Last pointer position (the paddle's target)
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    pub fn last_bounce(&self) -> Option<Bounce> {
        self.last_bounce
    }

    pub fn alive_blocks(&self) -> usize {
        self.blocks.iter().filter(|b| b.alive).count()
    }

    pub fn any_block_alive(&self) -> bool {
        self.blocks.iter().any(|b| b.alive)
    }

    /// Advance the field by one fixed step
    pub fn on_logic(&mut self, delta_ms: f32, out: &mut Vec<GameEvent>) {
        self.move_paddle();
        self.move_ball(delta_ms, out);
        self.move_explosions(delta_ms);

        if self.ball.alive {
            self.collide_ball_with_walls(out);
            self.collide_ball_with_blocks(out);
            self.collide_ball_with_paddle(out);
        }
    }

    /// React to a queued event
    pub fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::ScreenResized { .. } => {}
            GameEvent::PointerMoved(position) => {
                self.cursor_down = true;
                self.cursor = *position;
            }
            GameEvent::PointerReleased(_) => {
                self.cursor_down = false;
            }
            GameEvent::BallBrokeBlock {
                center,
                point,
                normal,
                reflect,
                ..
            } => {
                self.last_bounce = Some(Bounce {
                    point: *point,
                    normal: *normal,
                    reflect: *reflect,
                });
                let burst = Explosion::new(
                    &mut self.rng,
                    *center,
                    BLOCK_SPARK_RADIUS,
                    BLOCK_SPARK_COUNT,
                    Color::WHITE,
                );
                self.explosions.push(burst);
            }
            GameEvent::BallBouncedPaddle {
                point,
                normal,
                reflect,
            } => {
                self.last_bounce = Some(Bounce {
                    point: *point,
                    normal: *normal,
                    reflect: *reflect,
                });
                let burst = Explosion::new(
                    &mut self.rng,
                    *point,
                    PADDLE_SPARK_RADIUS,
                    PADDLE_SPARK_COUNT,
                    Color::YELLOW,
                );
                self.explosions.push(burst);
            }
            GameEvent::GetReady => self.reset_for_serve(),
            GameEvent::BallBouncedWall | GameEvent::BallFellOut | GameEvent::Go => {}
        }
    }

    /// Paddle to the middle, ball back above it
    fn reset_for_serve(&mut self) {
        self.paddle.center.x = self.screen.center_x();
        let above = self.paddle.rect().min.y - self.ball.circle.radius * 2.0;
        self.ball.respawn(Vec2::new(self.screen.center_x(), above));
    }

    fn move_paddle(&mut self) {
        if self.options.auto_play {
            self.cursor.x = self.ball.circle.center.x;
        }
        self.paddle.track(self.cursor.x, self.screen.width_f());
    }

    fn move_ball(&mut self, delta_ms: f32, out: &mut Vec<GameEvent>) {
        let ball = &mut self.ball;
        if !ball.alive {
            return;
        }

        let step = ball.speed * delta_ms;
        ball.circle.center += ball.direction * step;

        if ball.circle.top() >= self.screen.height_f() {
            ball.kill();
            log::debug!("ball fell out at x={:.1}", ball.circle.center.x);
            out.push(GameEvent::BallFellOut);
        }
    }

    fn move_explosions(&mut self, delta_ms: f32) {
        for explosion in &mut self.explosions {
            explosion.tick(delta_ms);
        }
        self.explosions.retain(Explosion::is_alive);
    }

    fn collide_ball_with_walls(&mut self, out: &mut Vec<GameEvent>) {
        let ball = &mut self.ball;
        let c = ball.circle.center;
        let r = ball.circle.radius;
        let before = ball.direction;
        let mut collided = false;

        if c.x + r >= self.screen.width_f() {
            ball.direction.x = -ball.direction.x.abs();
            collided = true;
        }
        if c.x - r <= 0.0 {
            ball.direction.x = ball.direction.x.abs();
            collided = true;
        }
        if c.y - r <= 0.0 {
            ball.direction.y = ball.direction.y.abs();
            collided = true;
        }

        ball.direction = vectors::normalize_or(ball.direction, before);

        if collided {
            log::trace!("ball bounced wall at ({:.1}, {:.1})", c.x, c.y);
            out.push(GameEvent::BallBouncedWall);
        }
    }

    /// Break the first touching block in grid order
    fn collide_ball_with_blocks(&mut self, out: &mut Vec<GameEvent>) {
        let ball = &mut self.ball;
        let Some((index, block)) = self
            .blocks
            .iter_mut()
            .enumerate()
            .find(|(_, block)| block.alive && ball.circle.touches(&block.circle))
        else {
            return;
        };

        let point = circle_contact_point(&ball.circle, &block.circle);
        let normal = match block.circle.direction_to(point) {
            Ok(normal) => normal,
            Err(err) => {
                log::warn!("block contact at its center: {err}");
                -ball.direction
            }
        };
        let reflect = match vectors::reflect(ball.direction, normal) {
            Ok(reflect) => reflect,
            Err(err) => {
                log::warn!("block bounce kept direction: {err}");
                ball.direction
            }
        };

        ball.direction = reflect;
        ball.accelerate();
        block.alive = false;

        log::trace!("ball broke block {index}, speed now {:.3}", ball.speed);
        out.push(GameEvent::BallBrokeBlock {
            block: index,
            center: block.circle.center,
            point,
            normal,
            reflect,
        });
    }

    fn collide_ball_with_paddle(&mut self, out: &mut Vec<GameEvent>) {
        let ball = &mut self.ball;
        let contact = circle_in_rect(&ball.circle, &self.paddle.rect());
        if !contact.hit() {
            return;
        }

        let reflect = match vectors::reflect(ball.direction, contact.normal) {
            Ok(reflect) => reflect,
            Err(err) => {
                log::warn!("paddle bounce kept direction: {err}");
                ball.direction
            }
        };
        ball.direction = reflect;

        log::trace!("ball bounced paddle, depth {:.2}", contact.depth);
        out.push(GameEvent::BallBouncedPaddle {
            point: ball.circle.center,
            normal: contact.normal,
            reflect,
        });
    }

    pub fn on_render(&self, canvas: &mut dyn Canvas) {
        for block in self.blocks.iter().filter(|b| b.alive) {
            let circle = &block.circle;
            canvas.draw_sprite(Sprite::Block, circle.top_left(), circle.radius * 2.0);
            if self.options.debug_hulls {
                canvas.draw_circle(circle.center, circle.radius, Style::Stroke(Color::WHITE));
            }
        }

        let ball = &self.ball.circle;
        canvas.draw_sprite(Sprite::Ball, ball.top_left(), ball.radius * 2.0);
        if self.options.debug_hulls {
            canvas.draw_circle(ball.center, ball.radius, Style::Stroke(Color::WHITE));
        }

        let paddle = self.paddle.rect();
        canvas.draw_rect(paddle, Style::Fill(Color::RED));
        canvas.draw_rect(paddle, Style::Stroke(Color::WHITE));

        if self.options.debug_bounce {
            if let Some(bounce) = self.last_bounce {
                canvas.draw_line(
                    bounce.point,
                    bounce.point + bounce.normal * DEBUG_LINE_LENGTH,
                    Style::Stroke(Color::CYAN),
                );
                canvas.draw_line(
                    bounce.point,
                    bounce.point + bounce.reflect * DEBUG_LINE_LENGTH,
                    Style::Stroke(Color::GREEN),
                );
            }
        }

        if self.cursor_down {
            canvas.draw_circle(self.cursor, CURSOR_RADIUS, Style::Stroke(Color::GRAY));
        }

        for explosion in &self.explosions {
            explosion.on_render(canvas);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{CommandList, DrawCommand};
    use crate::sim::geometry::Circle;

    const DT: f32 = 16.67;

    /// 1200x800 field with the paddle parked near the bottom and no blocks
    fn empty_field(ball_center: Vec2, direction: Vec2) -> PlayField {
        let ball = Ball::new(Circle::new(ball_center, 37.5), direction, 1.0);
        let paddle = Paddle::new(Vec2::new(600.0, 650.0), 150.0, 18.75);
        PlayField::new(
            ScreenSize::new(1200, 800),
            Vec::new(),
            ball,
            paddle,
            FieldOptions::default(),
            1,
        )
    }

    #[test]
    fn test_ball_moves_straight_up_without_events() {
        let mut field = empty_field(Vec2::new(600.0, 400.0), Vec2::new(0.0, -1.0));
        let mut out = Vec::new();
        let mut last_y = field.ball.circle.center.y;

        for _ in 0..10 {
            field.on_logic(DT, &mut out);
            let y = field.ball.circle.center.y;
            assert!(y < last_y);
            last_y = y;
        }

        assert!((field.ball.circle.center.y - (400.0 - 10.0 * DT)).abs() < 1e-2);
        assert_eq!(field.ball.circle.center.x, 600.0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_right_wall_flips_x_once() {
        let dir = Vec2::new(1.0, -1.0).normalize();
        let mut field = empty_field(Vec2::new(1160.0, 300.0), dir);
        let mut out = Vec::new();

        field.on_logic(DT, &mut out);

        assert!(field.ball.direction.x < 0.0);
        assert!(field.ball.direction.y < 0.0);
        assert!((field.ball.direction.length() - 1.0).abs() < 1e-5);
        assert_eq!(out, vec![GameEvent::BallBouncedWall]);
    }

    #[test]
    fn test_corner_flips_both_axes_with_one_event() {
        let dir = Vec2::new(-1.0, -1.0).normalize();
        let mut field = empty_field(Vec2::new(40.0, 40.0), dir);
        let mut out = Vec::new();

        field.on_logic(DT, &mut out);

        assert!(field.ball.direction.x > 0.0);
        assert!(field.ball.direction.y > 0.0);
        assert_eq!(out, vec![GameEvent::BallBouncedWall]);
    }

    #[test]
    fn test_ball_falls_out() {
        let mut field = empty_field(Vec2::new(100.0, 830.0), Vec2::new(0.0, 1.0));
        field.ball.speed = 2.0;
        let mut out = Vec::new();

        field.on_logic(DT, &mut out);

        assert!(!field.ball.alive);
        assert_eq!(field.ball.speed, 1.0);
        assert_eq!(out, vec![GameEvent::BallFellOut]);

        // A dead ball neither moves nor collides
        let y = field.ball.circle.center.y;
        out.clear();
        field.on_logic(DT, &mut out);
        assert_eq!(field.ball.circle.center.y, y);
        assert!(out.is_empty());
    }

    #[test]
    fn test_single_block_is_broken() {
        let mut field = empty_field(Vec2::new(600.0, 300.0), Vec2::new(0.0, -1.0));
        field.blocks.push(Block::new(Circle::new(Vec2::new(600.0, 200.0), 46.0)));
        field.blocks.push(Block::new(Circle::new(Vec2::new(900.0, 200.0), 46.0)));
        let mut out = Vec::new();

        // Ball top at 262.5 - 16.67; gap between centers closes to < 83.5
        field.on_logic(DT, &mut out);

        assert!(!field.blocks[0].alive);
        assert!(field.blocks[1].alive);
        assert!((field.ball.speed - 1.025).abs() < 1e-6);
        assert!(field.ball.direction.y > 0.0);
        assert_eq!(out.len(), 1);

        let GameEvent::BallBrokeBlock {
            block,
            center,
            point,
            normal,
            reflect,
        } = out[0]
        else {
            panic!("expected BallBrokeBlock, got {:?}", out[0]);
        };
        assert_eq!(block, 0);
        assert_eq!(center, Vec2::new(600.0, 200.0));
        assert_eq!(reflect, field.ball.direction);
        // Outward normal from block through the contact point
        assert!((normal - Vec2::new(0.0, 1.0)).length() < 1e-5);
        // Point lies on the segment between the centers
        let ball_center = field.ball.circle.center;
        assert!((point.x - 600.0).abs() < 1e-4);
        assert!(point.y > 200.0 && point.y < ball_center.y);
    }

    #[test]
    fn test_ball_landing_on_block_center_reverses() {
        // 216 - 16 lands exactly on the block center, so the contact point
        // coincides with it and the normal is degenerate
        let mut field = empty_field(Vec2::new(600.0, 216.0), Vec2::new(0.0, -1.0));
        field.blocks.push(Block::new(Circle::new(Vec2::new(600.0, 200.0), 46.0)));
        let mut out = Vec::new();

        field.on_logic(16.0, &mut out);

        assert_eq!(field.ball.circle.center, Vec2::new(600.0, 200.0));
        let dir = field.ball.direction;
        assert!(dir.is_finite());
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert_eq!(dir, Vec2::new(0.0, 1.0));
        assert!(!field.blocks[0].alive);

        assert_eq!(out.len(), 1);
        match out[0] {
            GameEvent::BallBrokeBlock {
                point,
                normal,
                reflect,
                ..
            } => {
                assert_eq!(point, Vec2::new(600.0, 200.0));
                assert_eq!(normal, Vec2::new(0.0, 1.0));
                assert_eq!(reflect, dir);
            }
            ref other => panic!("expected BallBrokeBlock, got {other:?}"),
        }
    }

    #[test]
    fn test_only_first_overlapping_block_breaks() {
        let mut field = empty_field(Vec2::new(600.0, 300.0), Vec2::new(0.0, -1.0));
        field.blocks.push(Block::new(Circle::new(Vec2::new(570.0, 220.0), 46.0)));
        field.blocks.push(Block::new(Circle::new(Vec2::new(630.0, 220.0), 46.0)));
        let mut out = Vec::new();

        field.on_logic(DT, &mut out);

        assert!(!field.blocks[0].alive);
        assert!(field.blocks[1].alive);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_speed_caps_at_max() {
        let mut field = empty_field(Vec2::new(600.0, 300.0), Vec2::new(0.0, -1.0));
        field.ball.speed = 4.9;
        field.blocks.push(Block::new(Circle::new(Vec2::new(600.0, 150.0), 46.0)));
        let mut out = Vec::new();

        field.on_logic(DT, &mut out);

        assert!(!field.blocks[0].alive);
        assert_eq!(field.ball.speed, BALL_MAX_SPEED);
    }

    #[test]
    fn test_paddle_bounce_sends_ball_up() {
        // Paddle top is at 631.25; the ball ends the step overlapping it
        let mut field = empty_field(Vec2::new(600.0, 585.0), Vec2::new(0.0, 1.0));
        let mut out = Vec::new();

        field.on_logic(DT, &mut out);

        assert!(field.ball.direction.y < 0.0);
        assert_eq!(out.len(), 1);
        match &out[0] {
            GameEvent::BallBouncedPaddle {
                point,
                normal,
                reflect,
            } => {
                assert_eq!(*normal, Vec2::new(0.0, -1.0));
                assert_eq!(*point, field.ball.circle.center);
                assert_eq!(*reflect, field.ball.direction);
            }
            other => panic!("expected BallBouncedPaddle, got {other:?}"),
        }
    }

    #[test]
    fn test_paddle_follows_pointer_and_clamps() {
        let mut field = empty_field(Vec2::new(600.0, 300.0), Vec2::new(0.0, -1.0));
        let mut out = Vec::new();

        field.on_event(&GameEvent::PointerMoved(Vec2::new(300.0, 700.0)));
        assert!(field.cursor_down());
        field.on_logic(DT, &mut out);
        assert_eq!(field.paddle.center.x, 300.0);

        field.on_event(&GameEvent::PointerMoved(Vec2::new(1190.0, 700.0)));
        field.on_logic(DT, &mut out);
        assert_eq!(field.paddle.center.x, 1050.0);

        field.on_event(&GameEvent::PointerReleased(Vec2::new(1190.0, 700.0)));
        assert!(!field.cursor_down());
        field.on_logic(DT, &mut out);
        assert_eq!(field.paddle.center.x, 1050.0);
    }

    #[test]
    fn test_auto_play_tracks_ball() {
        let mut field = empty_field(Vec2::new(420.0, 300.0), Vec2::new(0.0, -1.0));
        field.set_options(FieldOptions {
            auto_play: true,
            ..FieldOptions::default()
        });
        let mut out = Vec::new();

        field.on_logic(DT, &mut out);
        assert_eq!(field.paddle.center.x, 420.0);
    }

    #[test]
    fn test_get_ready_resets_ball_and_paddle() {
        let mut field = empty_field(Vec2::new(100.0, 900.0), Vec2::new(1.0, 0.0));
        field.ball.default_direction = Vec2::new(0.0, -1.0);
        field.ball.alive = false;
        field.paddle.center.x = 200.0;

        field.on_event(&GameEvent::GetReady);

        assert!(field.ball.alive);
        assert_eq!(field.paddle.center.x, 600.0);
        assert_eq!(field.ball.direction, Vec2::new(0.0, -1.0));
        assert_eq!(field.ball.circle.center, Vec2::new(600.0, 631.25 - 75.0));
    }

    #[test]
    fn test_collision_events_spawn_explosions() {
        let mut field = empty_field(Vec2::new(600.0, 300.0), Vec2::new(0.0, -1.0));
        field.on_event(&GameEvent::BallBrokeBlock {
            block: 0,
            center: Vec2::new(10.0, 10.0),
            point: Vec2::new(10.0, 20.0),
            normal: Vec2::Y,
            reflect: Vec2::Y,
        });
        field.on_event(&GameEvent::BallBouncedPaddle {
            point: Vec2::new(50.0, 50.0),
            normal: Vec2::NEG_Y,
            reflect: Vec2::NEG_Y,
        });

        assert_eq!(field.explosions.len(), 2);
        assert_eq!(field.explosions[0].sparks().len(), BLOCK_SPARK_COUNT);
        assert_eq!(field.explosions[1].sparks().len(), PADDLE_SPARK_COUNT);
        assert_eq!(field.last_bounce().map(|b| b.point), Some(Vec2::new(50.0, 50.0)));

        let mut out = Vec::new();
        for _ in 0..SPARK_LIFE_FRAMES {
            field.on_logic(DT, &mut out);
        }
        assert!(field.explosions.is_empty());
    }

    #[test]
    fn test_render_draws_entities() {
        let mut field = empty_field(Vec2::new(600.0, 300.0), Vec2::new(0.0, -1.0));
        field.blocks.push(Block::new(Circle::new(Vec2::new(100.0, 100.0), 40.0)));
        let mut dead = Block::new(Circle::new(Vec2::new(300.0, 100.0), 40.0));
        dead.alive = false;
        field.blocks.push(dead);
        field.on_event(&GameEvent::PointerMoved(Vec2::new(5.0, 6.0)));

        let mut canvas = CommandList::new();
        field.on_render(&mut canvas);

        let sprites: Vec<_> = canvas
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Sprite { sprite, .. } => Some(*sprite),
                _ => None,
            })
            .collect();
        assert_eq!(sprites, vec![Sprite::Block, Sprite::Ball]);
        assert!(canvas.commands().contains(&DrawCommand::Circle {
            center: Vec2::new(5.0, 6.0),
            radius: CURSOR_RADIUS,
            style: Style::Stroke(Color::GRAY),
        }));
    }
}
