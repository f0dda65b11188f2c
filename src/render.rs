//! Render sink abstraction
//!
//! The core never touches pixels. Phases describe each frame through the
//! `Canvas` trait; the host maps the calls onto its own surface, sprites and
//! fonts. `CommandList` records the calls instead, for tests and headless runs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::geometry::Rect;

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const GRAY: Color = Color::rgb(0x88, 0x88, 0x88);
    pub const RED: Color = Color::rgb(0xff, 0x00, 0x00);
    pub const GREEN: Color = Color::rgb(0x00, 0xff, 0x00);
    pub const CYAN: Color = Color::rgb(0x00, 0xff, 0xff);
    pub const YELLOW: Color = Color::rgb(0xff, 0xff, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Scale the color channels by `factor` (clamped to 0..=1), keeping alpha
    pub fn scaled(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        let channel = |c: u8| (c as f32 * f) as u8;
        Self {
            r: channel(self.r),
            g: channel(self.g),
            b: channel(self.b),
            a: self.a,
        }
    }
}

/// Shape paint mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Style {
    Fill(Color),
    Stroke(Color),
}

/// Images the host supplies, scaled to the requested size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sprite {
    Ball,
    Block,
}

/// Drawing surface for one frame
pub trait Canvas {
    fn fill_background(&mut self, color: Color);

    /// Draw `sprite` scaled to a `size` square anchored at `top_left`
    fn draw_sprite(&mut self, sprite: Sprite, top_left: Vec2, size: f32);

    fn draw_circle(&mut self, center: Vec2, radius: f32, style: Style);

    fn draw_rect(&mut self, rect: Rect, style: Style);

    fn draw_line(&mut self, from: Vec2, to: Vec2, style: Style);

    /// Draw `text` with its baseline starting at `position`
    fn draw_text(&mut self, text: &str, position: Vec2, size: f32, color: Color);

    /// Width of `text` at `size`, as laid out by the host's font
    fn text_width(&self, text: &str, size: f32) -> f32;
}

/// A recorded canvas call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Background(Color),
    Sprite {
        sprite: Sprite,
        top_left: Vec2,
        size: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        style: Style,
    },
    Rect {
        rect: Rect,
        style: Style,
    },
    Line {
        from: Vec2,
        to: Vec2,
        style: Style,
    },
    Text {
        text: String,
        position: Vec2,
        size: f32,
        color: Color,
    },
}

/// Canvas that records every call
///
/// Text is measured with a fixed advance of `0.6 * size` per character.
#[derive(Debug, Clone, Default)]
pub struct CommandList {
    commands: Vec<DrawCommand>,
    last_frame_only: bool,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    /// List that keeps only the latest frame: a background fill starts over
    pub fn last_frame() -> Self {
        Self {
            commands: Vec::new(),
            last_frame_only: true,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Forget everything recorded so far
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// All text strings drawn, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Last background color filled, if any
    pub fn background(&self) -> Option<Color> {
        self.commands.iter().rev().find_map(|c| match c {
            DrawCommand::Background(color) => Some(*color),
            _ => None,
        })
    }
}

impl Canvas for CommandList {
    fn fill_background(&mut self, color: Color) {
        if self.last_frame_only {
            self.commands.clear();
        }
        self.commands.push(DrawCommand::Background(color));
    }

    fn draw_sprite(&mut self, sprite: Sprite, top_left: Vec2, size: f32) {
        self.commands.push(DrawCommand::Sprite {
            sprite,
            top_left,
            size,
        });
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, style: Style) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            style,
        });
    }

    fn draw_rect(&mut self, rect: Rect, style: Style) {
        self.commands.push(DrawCommand::Rect { rect, style });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, style: Style) {
        self.commands.push(DrawCommand::Line { from, to, style });
    }

    fn draw_text(&mut self, text: &str, position: Vec2, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            position,
            size,
            color,
        });
    }

    fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * 0.6
    }
}
