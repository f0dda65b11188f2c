//! 2D vector helpers used by the collision code
//!
//! Thin wrappers over `glam::Vec2` that pin down argument order and the
//! zero-length policy. `normalize` fails on a degenerate vector; simulation
//! code goes through `normalize_or` so a NaN direction never enters the field.

use std::fmt;

use glam::Vec2;

/// Squared lengths below this are treated as zero
const DEGENERATE_LENGTH_SQ: f32 = 1e-12;

/// Vector math failure
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VectorError {
    /// Normalizing a zero-length or non-finite vector
    Degenerate { x: f32, y: f32 },
}

impl fmt::Display for VectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorError::Degenerate { x, y } => {
                write!(f, "cannot normalize degenerate vector ({x}, {y})")
            }
        }
    }
}

impl std::error::Error for VectorError {}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

#[inline]
pub fn dot(a: Vec2, b: Vec2) -> f32 {
    a.dot(b)
}

#[inline]
pub fn scale(v: Vec2, s: f32) -> Vec2 {
    v * s
}

/// Unit vector pointing from `b` toward `a`
#[inline]
pub fn direction(a: Vec2, b: Vec2) -> Result<Vec2, VectorError> {
    normalize(a - b)
}

/// Scale `v` to unit length
pub fn normalize(v: Vec2) -> Result<Vec2, VectorError> {
    let degenerate = VectorError::Degenerate { x: v.x, y: v.y };
    if !v.is_finite() || v.length_squared() < DEGENERATE_LENGTH_SQ {
        return Err(degenerate);
    }
    v.try_normalize().ok_or(degenerate)
}

/// Normalize `v`, substituting `fallback` when it is degenerate.
///
/// `fallback` must already be unit length.
pub fn normalize_or(v: Vec2, fallback: Vec2) -> Vec2 {
    match normalize(v) {
        Ok(unit) => unit,
        Err(err) => {
            log::warn!("{err}; using ({}, {})", fallback.x, fallback.y);
            fallback
        }
    }
}

/// Reflect `v` across the unit normal `n` and renormalize.
///
/// v' = v - 2(n·v)n
pub fn reflect(v: Vec2, n: Vec2) -> Result<Vec2, VectorError> {
    let d = dot(n, v) * 2.0;
    normalize(v - scale(n, d))
}
