//! A round in progress: countdown, play, and the final result

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{Phase, PhaseContext};
use crate::audio::SoundEffect;
use crate::events::GameEvent;
use crate::render::{Canvas, Color};
use crate::settings::Settings;
use crate::sim::PlayField;

const BACKGROUND: Color = Color::rgb(0x20, 0x20, 0x20);
const ANNOUNCEMENT_SIZE: f32 = 96.0;
const LIVES_SIZE: f32 = 24.0;
const STATS_SIZE: f32 = 14.0;

/// What happens when an announcement's frame arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnouncementKind {
    /// Emits `GetReady`
    Countdown,
    /// Emits `Go`
    Go,
    /// Starts play
    Finished,
}

/// A countdown message stamped with the frame it appears on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub frame: u64,
    pub text: &'static str,
    pub kind: AnnouncementKind,
}

/// "3... 2... 1... GO!" before the ball is released
#[derive(Debug, Clone, PartialEq)]
pub struct Countdown {
    pub announcements: Vec<Announcement>,
    pub lives: u32,
}

impl Countdown {
    /// Five announcements spaced `(fps / 4) * 3` frames apart, after `start`
    pub fn new(start: u64, frames_per_second: u32, lives: u32) -> Self {
        let step = u64::from(frames_per_second / 4) * 3;
        let script = [
            ("3...", AnnouncementKind::Countdown),
            ("2...", AnnouncementKind::Countdown),
            ("1...", AnnouncementKind::Countdown),
            ("GO!", AnnouncementKind::Go),
            ("", AnnouncementKind::Finished),
        ];
        let announcements: Vec<_> = script
            .into_iter()
            .zip(1u64..)
            .map(|((text, kind), k)| Announcement {
                frame: start.saturating_add(step.saturating_mul(k)),
                text,
                kind,
            })
            .collect();

        debug_assert!(
            announcements.windows(2).all(|w| w[0].frame <= w[1].frame),
            "announcements out of order"
        );
        Self {
            announcements,
            lives,
        }
    }

    /// The latest announcement that has been reached by `frame`
    pub fn current(&self, frame: u64) -> Option<&Announcement> {
        self.announcements.iter().rev().find(|a| a.frame <= frame)
    }
}

/// Where the round stands
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    GetReady(Countdown),
    Active(u32),
    Won(u32),
    Lost(u32),
}

impl Status {
    pub fn lives(&self) -> u32 {
        match self {
            Status::GetReady(countdown) => countdown.lives,
            Status::Active(lives) | Status::Won(lives) | Status::Lost(lives) => *lives,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Status::GetReady(_) => "get-ready",
            Status::Active(_) => "active",
            Status::Won(_) => "won",
            Status::Lost(_) => "lost",
        }
    }

    /// Won or lost
    pub fn is_over(&self) -> bool {
        matches!(self, Status::Won(_) | Status::Lost(_))
    }
}

/// Round statistics shown on the end screen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub lives: u32,
    pub wall_bounces: u32,
    pub paddle_bounces: u32,
    pub blocks_broken: u32,
    /// Highest ball speed reached (pixels per millisecond)
    pub max_speed: f32,
}

/// The play phase
#[derive(Debug)]
pub struct Playing {
    field: PlayField,
    status: Status,
    statistics: Statistics,
}

impl Playing {
    /// Start a round entered on `frame`, with the first countdown after the
    /// configured delay
    pub fn new(field: PlayField, frame: u64, settings: &Settings) -> Self {
        let start = frame.saturating_add(settings.get_ready_delay_frames);
        let lives = settings.starting_lives;
        Self {
            field,
            status: Status::GetReady(Countdown::new(start, settings.frames_per_second, lives)),
            statistics: Statistics {
                lives,
                ..Statistics::default()
            },
        }
    }

    pub fn field(&self) -> &PlayField {
        &self.field
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    fn set_status(&mut self, status: Status) {
        log::debug!("round {} -> {}", self.status.name(), status.name());
        self.status = status;
        self.statistics.lives = self.status.lives();
    }

    pub fn on_event(&mut self, event: &GameEvent, ctx: &mut PhaseContext<'_>) -> Option<Phase> {
        self.field.on_event(event);

        match event {
            GameEvent::ScreenResized { .. }
            | GameEvent::PointerMoved(_)
            | GameEvent::PointerReleased(_) => {}
            GameEvent::BallBrokeBlock { .. } => {
                self.statistics.blocks_broken += 1;
                self.statistics.max_speed = self.statistics.max_speed.max(self.field.ball.speed);
                if !self.field.any_block_alive() && !self.status.is_over() {
                    log::info!("all blocks broken on frame {}", ctx.frame);
                    self.set_status(Status::Won(self.status.lives()));
                }
                ctx.sounds.play_random_rate(SoundEffect::BlockBreak);
            }
            GameEvent::BallBouncedPaddle { .. } => {
                self.statistics.paddle_bounces += 1;
                ctx.sounds.play_random_rate(SoundEffect::Tak);
            }
            GameEvent::BallBouncedWall => {
                self.statistics.wall_bounces += 1;
                ctx.sounds.play_random_rate(SoundEffect::Bounce);
            }
            GameEvent::BallFellOut => {
                let lives = self.status.lives();
                if lives <= 1 {
                    log::info!("last ball lost on frame {}", ctx.frame);
                    self.set_status(Status::Lost(0));
                } else {
                    let start = ctx.frame.saturating_add(u64::from(ctx.settings.frames_per_second));
                    let countdown = Countdown::new(start, ctx.settings.frames_per_second, lives - 1);
                    self.set_status(Status::GetReady(countdown));
                }
                ctx.sounds.play(SoundEffect::Failure);
            }
            GameEvent::GetReady => ctx.sounds.play(SoundEffect::Ready),
            GameEvent::Go => ctx.sounds.play(SoundEffect::Go),
        }

        None
    }

    pub fn on_logic(&mut self, ctx: &mut PhaseContext<'_>) -> Option<Phase> {
        match &self.status {
            Status::GetReady(countdown) => {
                let Some(announcement) = countdown.current(ctx.frame) else {
                    return None;
                };
                let on_time = announcement.frame == ctx.frame;
                let kind = announcement.kind;
                let lives = countdown.lives;
                match kind {
                    AnnouncementKind::Countdown => {
                        if on_time {
                            ctx.out.push(GameEvent::GetReady);
                        }
                    }
                    AnnouncementKind::Go => {
                        if on_time {
                            ctx.out.push(GameEvent::Go);
                        }
                    }
                    AnnouncementKind::Finished => self.set_status(Status::Active(lives)),
                }
            }
            Status::Active(_) => self.field.on_logic(ctx.delta_ms, ctx.out),
            Status::Won(_) | Status::Lost(_) => {}
        }
        None
    }

    pub fn on_render(&self, frame: u64, canvas: &mut dyn Canvas) {
        canvas.fill_background(BACKGROUND);
        self.field.on_render(canvas);

        match &self.status {
            Status::GetReady(countdown) => {
                if let Some(announcement) = countdown.current(frame) {
                    self.draw_centered(canvas, announcement.text);
                }
                self.draw_lives(canvas);
            }
            Status::Active(_) => self.draw_lives(canvas),
            Status::Won(_) => {
                self.draw_centered(canvas, "YOU WIN!");
                self.draw_statistics(canvas);
            }
            Status::Lost(_) => {
                self.draw_centered(canvas, "GAME OVER");
                self.draw_statistics(canvas);
            }
        }
    }

    fn draw_centered(&self, canvas: &mut dyn Canvas, text: &str) {
        let screen = self.field.screen;
        let width = canvas.text_width(text, ANNOUNCEMENT_SIZE);
        let position = Vec2::new(screen.center_x() - width / 2.0, screen.height_f() / 2.0);
        canvas.draw_text(text, position, ANNOUNCEMENT_SIZE, Color::WHITE);
    }

    /// Bottom-left corner, inset by one ball radius
    fn footer_position(&self) -> Vec2 {
        let r = self.field.ball.circle.radius;
        Vec2::new(r, self.field.screen.height_f() - r)
    }

    fn draw_lives(&self, canvas: &mut dyn Canvas) {
        let text = format!("Lives: {}", self.status.lives());
        canvas.draw_text(&text, self.footer_position(), LIVES_SIZE, Color::WHITE);
    }

    fn draw_statistics(&self, canvas: &mut dyn Canvas) {
        let stats = &self.statistics;
        let text = format!(
            "Lives: {}, Wall bounces: {}, Paddle bounces: {}, Max speed: {:.3}",
            self.status.lives(),
            stats.wall_bounces,
            stats.paddle_bounces,
            stats.max_speed
        );
        canvas.draw_text(&text, self.footer_position(), STATS_SIZE, Color::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Sounds;
    use crate::audio::tests::RecordingAudio;
    use crate::phase::build_field;
    use crate::phase::tests::Harness;
    use crate::render::CommandList;
    use crate::sim::ScreenSize;

    fn harness() -> (Harness, RecordingAudio) {
        let rec = RecordingAudio::default();
        let sounds = Sounds::new(Box::new(rec.clone()), 5);
        (Harness::new(Settings::default(), sounds), rec)
    }

    fn playing(h: &mut Harness) -> Playing {
        let field = build_field(ScreenSize::new(1080, 1920), &h.settings, &mut h.rng);
        Playing::new(field, 0, &h.settings)
    }

    fn broke(block: usize) -> GameEvent {
        GameEvent::BallBrokeBlock {
            block,
            center: Vec2::ZERO,
            point: Vec2::ZERO,
            normal: Vec2::Y,
            reflect: Vec2::Y,
        }
    }

    #[test]
    fn test_countdown_schedule() {
        let countdown = Countdown::new(0, 60, 3);
        let frames: Vec<u64> = countdown.announcements.iter().map(|a| a.frame).collect();
        assert_eq!(frames, vec![45, 90, 135, 180, 225]);
        let texts: Vec<&str> = countdown.announcements.iter().map(|a| a.text).collect();
        assert_eq!(texts, vec!["3...", "2...", "1...", "GO!", ""]);

        assert!(countdown.current(44).is_none());
        assert_eq!(countdown.current(45).map(|a| a.text), Some("3..."));
        assert_eq!(countdown.current(100).map(|a| a.text), Some("2..."));
        assert_eq!(countdown.current(1000).map(|a| a.kind), Some(AnnouncementKind::Finished));
    }

    #[test]
    fn test_countdown_emits_only_on_exact_frame() {
        let (mut h, _) = harness();
        let mut play = playing(&mut h);
        play.status = Status::GetReady(Countdown::new(0, 60, 3));

        h.frame = 45;
        play.on_logic(&mut h.ctx());
        assert_eq!(h.out, vec![GameEvent::GetReady]);

        h.out.clear();
        h.frame = 46;
        play.on_logic(&mut h.ctx());
        assert!(h.out.is_empty());

        h.frame = 180;
        play.on_logic(&mut h.ctx());
        assert_eq!(h.out, vec![GameEvent::Go]);

        h.frame = 225;
        play.on_logic(&mut h.ctx());
        assert_eq!(play.status(), &Status::Active(3));
    }

    #[test]
    fn test_ball_stays_put_during_countdown() {
        let (mut h, _) = harness();
        let mut play = playing(&mut h);
        let start = play.field().ball.circle.center;
        for frame in 1..40 {
            h.frame = frame;
            play.on_logic(&mut h.ctx());
        }
        assert_eq!(play.field().ball.circle.center, start);
        assert!(h.out.is_empty());
    }

    #[test]
    fn test_default_first_countdown_follows_delay() {
        let (mut h, _) = harness();
        let field = build_field(ScreenSize::new(1080, 1920), &h.settings, &mut h.rng);
        let play = Playing::new(field, 7, &h.settings);
        match play.status() {
            Status::GetReady(countdown) => {
                assert_eq!(countdown.lives, 3);
                assert_eq!(countdown.announcements[0].frame, 7 + 10 + 45);
            }
            other => panic!("expected get-ready, got {other:?}"),
        }
    }

    #[test]
    fn test_countdown_saturates_at_far_frames() {
        let (mut h, _) = harness();
        let field = build_field(ScreenSize::new(1080, 1920), &h.settings, &mut h.rng);
        let mut settings = h.settings.clone();
        settings.get_ready_delay_frames = u64::MAX;

        let play = Playing::new(field, 1, &settings);
        match play.status() {
            Status::GetReady(countdown) => {
                assert!(countdown.announcements.iter().all(|a| a.frame == u64::MAX));
            }
            other => panic!("expected get-ready, got {other:?}"),
        }
    }

    #[test]
    fn test_last_life_lost() {
        let (mut h, rec) = harness();
        let mut play = playing(&mut h);
        play.status = Status::Active(1);

        play.on_event(&GameEvent::BallFellOut, &mut h.ctx());

        assert_eq!(play.status(), &Status::Lost(0));
        assert_eq!(rec.effects(), vec![SoundEffect::Failure]);
    }

    #[test]
    fn test_life_lost_restarts_countdown() {
        let (mut h, _) = harness();
        let mut play = playing(&mut h);
        play.status = Status::Active(3);
        h.frame = 500;

        play.on_event(&GameEvent::BallFellOut, &mut h.ctx());

        match play.status() {
            Status::GetReady(countdown) => {
                assert_eq!(countdown.lives, 2);
                assert_eq!(countdown.announcements[0].frame, 500 + 60 + 45);
            }
            other => panic!("expected get-ready, got {other:?}"),
        }
        assert_eq!(play.statistics().lives, 2);
    }

    #[test]
    fn test_breaking_every_block_wins() {
        let (mut h, rec) = harness();
        let mut play = playing(&mut h);
        play.status = Status::Active(3);
        assert_eq!(play.field().alive_blocks(), 72);

        // Park the ball on each block in turn and let the field break it
        for index in 0..72 {
            let center = play.field.blocks[index].circle.center;
            play.field.ball.circle.center = center + Vec2::new(0.0, 1.0);
            play.field.ball.direction = Vec2::new(0.0, -1.0);
            play.field.ball.speed = 0.0;

            h.out.clear();
            play.on_logic(&mut h.ctx());
            let events = std::mem::take(&mut h.out);
            assert!(
                events.iter().any(|e| matches!(e, GameEvent::BallBrokeBlock { block, .. } if *block == index)),
                "block {index} did not break: {events:?}"
            );
            for event in &events {
                play.on_event(event, &mut h.ctx());
            }
            if index < 71 {
                assert_eq!(play.status(), &Status::Active(3));
            }
        }

        assert_eq!(play.field().alive_blocks(), 0);
        assert_eq!(play.status(), &Status::Won(3));
        assert_eq!(play.statistics().blocks_broken, 72);
        assert!(rec.effects().contains(&SoundEffect::BlockBreak));
    }

    #[test]
    fn test_won_with_single_block() {
        let (mut h, _) = harness();
        let mut play = playing(&mut h);
        for block in play.field.blocks.iter_mut().skip(1) {
            block.alive = false;
        }
        play.status = Status::Active(2);
        play.field.blocks[0].alive = false;

        play.on_event(&broke(0), &mut h.ctx());
        assert_eq!(play.status(), &Status::Won(2));

        // Terminal: nothing moves any more
        let ball = play.field().ball.circle.center;
        play.on_logic(&mut h.ctx());
        assert_eq!(play.field().ball.circle.center, ball);
    }

    #[test]
    fn test_events_update_statistics_and_sounds() {
        let (mut h, rec) = harness();
        let mut play = playing(&mut h);

        play.on_event(&GameEvent::BallBouncedWall, &mut h.ctx());
        play.on_event(&GameEvent::BallBouncedWall, &mut h.ctx());
        play.on_event(
            &GameEvent::BallBouncedPaddle {
                point: Vec2::ZERO,
                normal: Vec2::NEG_Y,
                reflect: Vec2::NEG_Y,
            },
            &mut h.ctx(),
        );
        play.on_event(&GameEvent::GetReady, &mut h.ctx());
        play.on_event(&GameEvent::Go, &mut h.ctx());

        assert_eq!(play.statistics().wall_bounces, 2);
        assert_eq!(play.statistics().paddle_bounces, 1);
        assert_eq!(
            rec.effects(),
            vec![
                SoundEffect::Bounce,
                SoundEffect::Bounce,
                SoundEffect::Tak,
                SoundEffect::Ready,
                SoundEffect::Go
            ]
        );
    }

    #[test]
    fn test_render_texts() {
        let (mut h, _) = harness();
        let mut play = playing(&mut h);
        play.status = Status::GetReady(Countdown::new(0, 60, 3));

        let mut canvas = CommandList::new();
        play.on_render(50, &mut canvas);
        assert_eq!(canvas.background(), Some(Color::rgb(0x20, 0x20, 0x20)));
        assert_eq!(canvas.texts().collect::<Vec<_>>(), vec!["3...", "Lives: 3"]);

        play.status = Status::Lost(0);
        canvas.clear();
        play.on_render(50, &mut canvas);
        let texts: Vec<_> = canvas.texts().collect();
        assert_eq!(texts[0], "GAME OVER");
        assert!(texts[1].starts_with("Lives: 0, Wall bounces: 0, Paddle bounces: 0"));
    }
}
