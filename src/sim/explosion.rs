//! Spark bursts spawned on collisions
//!
//! Purely visual: nothing here feeds back into gameplay.

use glam::Vec2;
use rand::Rng;

use super::vectors;
use crate::consts::{SPARK_GRAVITY, SPARK_LIFE_FRAMES, SPARK_MAX_SPEED};
use crate::render::{Canvas, Color, Style};

/// A single spark
#[derive(Debug, Clone)]
pub struct Spark {
    pub direction: Vec2,
    pub speed: f32,
    pub gravity: f32,
    /// Remaining life in frames
    pub life: u32,
    pub life_max: u32,
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl Spark {
    /// Advance one frame: gravity bends the direction, then the spark moves
    pub fn tick(&mut self, delta_ms: f32) {
        let bent = self.direction + Vec2::new(0.0, self.gravity * delta_ms);
        self.direction = vectors::normalize_or(bent, self.direction);
        self.center += self.direction * (self.speed * delta_ms);
        self.life = self.life.saturating_sub(1);
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Color faded by remaining life
    pub fn current_color(&self) -> Color {
        let bright = self.life as f32 / self.life_max.max(1) as f32;
        self.color.scaled(bright)
    }
}

/// A burst of sparks around one point
#[derive(Debug, Clone)]
pub struct Explosion {
    sparks: Vec<Spark>,
}

impl Explosion {
    /// Spawn `count` sparks flying out of `center` in random directions
    pub fn new<R: Rng>(
        rng: &mut R,
        center: Vec2,
        spark_radius: f32,
        count: usize,
        color: Color,
    ) -> Self {
        let sparks = (0..count)
            .map(|_| {
                let raw = Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0));
                Spark {
                    direction: vectors::normalize_or(raw, Vec2::X),
                    speed: rng.random::<f32>() * SPARK_MAX_SPEED,
                    gravity: SPARK_GRAVITY,
                    life: SPARK_LIFE_FRAMES,
                    life_max: SPARK_LIFE_FRAMES,
                    center,
                    radius: spark_radius,
                    color,
                }
            })
            .collect();
        Self { sparks }
    }

    /// Advance all sparks and drop the burnt-out ones
    pub fn tick(&mut self, delta_ms: f32) {
        for spark in &mut self.sparks {
            spark.tick(delta_ms);
        }
        self.sparks.retain(Spark::is_alive);
    }

    /// Alive while any spark still has life
    pub fn is_alive(&self) -> bool {
        self.sparks.iter().any(Spark::is_alive)
    }

    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    pub fn on_render(&self, canvas: &mut dyn Canvas) {
        for spark in &self.sparks {
            canvas.draw_circle(spark.center, spark.radius, Style::Fill(spark.current_color()));
        }
    }
}
