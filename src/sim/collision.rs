//! Collision detection for circles against circles and rectangles
//!
//! Blocks are circles, so ball-block tests are a plain radius sum. The paddle
//! is an axis-aligned box, which needs a minimum-depth contact to pick the
//! face the ball is pushing into.

use glam::Vec2;

use super::geometry::{Circle, Rect};
use super::vectors;

/// Result of a circle-in-rectangle check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Surface normal, pointing from the rectangle toward the circle
    pub normal: Vec2,
    /// Penetration depth (0 when not touching)
    pub depth: f32,
}

impl Contact {
    pub fn miss() -> Self {
        Self {
            normal: Vec2::ZERO,
            depth: 0.0,
        }
    }

    #[inline]
    pub fn hit(&self) -> bool {
        self.depth > 0.0
    }

    /// Tangent along the contact surface
    #[inline]
    pub fn tangent(&self) -> Vec2 {
        Vec2::new(self.normal.y, -self.normal.x)
    }
}

/// Contact point between two overlapping circles
///
/// The centers are weighted by the opposite radius, so the point lies on the
/// segment between them, at the spot where the two rims meet when they touch.
pub fn circle_contact_point(a: &Circle, b: &Circle) -> Vec2 {
    let sum = a.radius + b.radius;
    Vec2::new(
        (a.center.x * b.radius + b.center.x * a.radius) / sum,
        (a.center.y * b.radius + b.center.y * a.radius) / sum,
    )
}

/// Minimum-depth contact between a circle and a rectangle
///
/// When the circle center lies outside the rectangle on both axes the closest
/// corner decides the normal. Otherwise the face with the smallest overlap
/// wins.
pub fn circle_in_rect(circle: &Circle, rect: &Rect) -> Contact {
    let c = circle.center;
    let r = circle.radius;

    let outside_x = c.x < rect.min.x || c.x > rect.max.x;
    let outside_y = c.y < rect.min.y || c.y > rect.max.y;

    if outside_x && outside_y {
        let closest = rect.clamp_point(c);
        let offset = c - closest;
        let Ok(normal) = vectors::normalize(offset) else {
            return Contact::miss();
        };
        let distance = vectors::dot(normal, offset);
        return Contact {
            normal,
            depth: (r - distance).max(0.0),
        };
    }

    let overlap_min_x = (c.x + r) - rect.min.x;
    let overlap_min_y = (c.y + r) - rect.min.y;
    let overlap_max_x = rect.max.x - (c.x - r);
    let overlap_max_y = rect.max.y - (c.y - r);

    let overlap_x = overlap_min_x.min(overlap_max_x);
    let overlap_y = overlap_min_y.min(overlap_max_y);

    let normal = if overlap_x < overlap_y {
        let nx = if overlap_min_x < overlap_max_x { -1.0 } else { 1.0 };
        Vec2::new(nx, 0.0)
    } else {
        let ny = if overlap_min_y < overlap_max_y { -1.0 } else { 1.0 };
        Vec2::new(0.0, ny)
    };

    Contact {
        normal,
        depth: overlap_x.min(overlap_y).max(0.0),
    }
}
