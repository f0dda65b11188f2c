//! Play field entities
//!
//! Plain data plus derived geometry. The play field owns one of each (and the
//! block grid) for the lifetime of a round.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Circle, Rect};
use crate::consts::{BALL_MAX_SPEED, BALL_SPEED_GROWTH};

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub alive: bool,
    pub circle: Circle,
    /// Unit direction of travel
    pub direction: Vec2,
    /// Direction restored on every get-ready
    pub default_direction: Vec2,
    /// Speed restored when the ball is lost (pixels per millisecond)
    pub speed_base: f32,
    pub speed: f32,
}

impl Ball {
    pub fn new(circle: Circle, direction: Vec2, speed_base: f32) -> Self {
        Self {
            alive: true,
            circle,
            direction,
            default_direction: direction,
            speed_base,
            speed: speed_base,
        }
    }

    /// Speed up after breaking a block
    pub fn accelerate(&mut self) {
        self.speed = (self.speed * BALL_SPEED_GROWTH).min(BALL_MAX_SPEED);
    }

    /// Take the ball out of play
    pub fn kill(&mut self) {
        self.alive = false;
        self.speed = self.speed_base;
    }

    /// Put the ball back at `center` with its default direction
    pub fn respawn(&mut self, center: Vec2) {
        self.circle.center = center;
        self.direction = self.default_direction;
        self.alive = true;
    }
}

/// A breakable block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub circle: Circle,
    pub alive: bool,
}

impl Block {
    pub fn new(circle: Circle) -> Self {
        Self {
            circle,
            alive: true,
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Center point (x follows the pointer, y never changes)
    pub center: Vec2,
    pub half_width: f32,
    pub half_height: f32,
}

impl Paddle {
    pub fn new(center: Vec2, half_width: f32, half_height: f32) -> Self {
        Self {
            center,
            half_width,
            half_height,
        }
    }

    /// Collision hull, derived from the current center
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.center, self.half_width, self.half_height)
    }

    /// Move toward `target_x`, keeping the paddle inside `[0, screen_width]`
    pub fn track(&mut self, target_x: f32, screen_width: f32) {
        let mut x = target_x;
        let left = x - self.half_width;
        let right = x + self.half_width;
        if left < 0.0 {
            x -= left;
        }
        if right > screen_width {
            x -= right - screen_width;
        }
        self.center.x = x;
    }
}
