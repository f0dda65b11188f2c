//! Circle and axis-aligned rectangle primitives
//!
//! Screen space: x grows right, y grows down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::vectors::{self, VectorError};

/// Drawable area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn width_f(&self) -> f32 {
        self.width as f32
    }

    #[inline]
    pub fn height_f(&self) -> f32 {
        self.height as f32
    }

    /// Horizontal center line
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.width as f32 / 2.0
    }
}

/// A circle hull (ball, blocks, sparks)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        debug_assert!(radius > 0.0, "circle radius must be positive, got {radius}");
        Self { center, radius }
    }

    /// Unit vector from this circle's center toward `point`
    pub fn direction_to(&self, point: Vec2) -> Result<Vec2, VectorError> {
        vectors::direction(point, self.center)
    }

    /// Top edge (smallest y)
    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.radius
    }

    /// Top-left corner of the bounding square (sprite anchor)
    #[inline]
    pub fn top_left(&self) -> Vec2 {
        self.center - Vec2::splat(self.radius)
    }

    /// Whether two circles touch or overlap
    pub fn touches(&self, other: &Circle) -> bool {
        vectors::distance(self.center, other.center) <= self.radius + other.radius
    }
}

/// Axis-aligned rectangle given by its corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        debug_assert!(min.x <= max.x && min.y <= max.y, "inverted rectangle");
        Self { min, max }
    }

    /// Rectangle from a center point and half extents
    pub fn from_center(center: Vec2, half_width: f32, half_height: f32) -> Self {
        let half = Vec2::new(half_width, half_height);
        Self::new(center - half, center + half)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Closest point inside the rectangle to `point`
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
        )
    }
}
