//! Surface-agnostic rendering
//!
//! The world is turned into a flat list of [`DrawCmd`]s once per frame. The
//! browser build paints them with Canvas 2D; tests and the native demo inspect
//! them directly.

pub mod shapes;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::Rect;

pub use shapes::{build_frame, instruction_lines, overlay_lines};

/// RGBA color, alpha in 0-1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS color string for `fillStyle`/`strokeStyle`
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Fixed colors for every kind of thing on screen
pub mod palette {
    use super::Color;

    pub const BACKGROUND: Color = Color::rgb(0, 0, 0);
    pub const PLAYER: Color = Color::rgb(0x00, 0xff, 0xff);
    pub const OBSTACLE: Color = Color::rgb(0xff, 0x44, 0x44);
    pub const POINT: Color = Color::rgb(0x44, 0xff, 0x44);
    pub const GUIDE: Color = Color::rgba(255, 255, 255, 0.3);
    pub const OVERLAY: Color = Color::rgba(0, 0, 0, 0.8);
    pub const TEXT: Color = Color::rgb(255, 255, 255);
    pub const HINT: Color = Color::rgb(200, 200, 200);
}

/// Horizontal anchor for [`DrawCmd::Text`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    /// Value for the canvas `textAlign` property
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        }
    }
}

/// One primitive to paint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCmd {
    /// Fill the whole surface
    Clear { color: Color },
    FillRect {
        rect: Rect,
        color: Color,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    /// Text with its baseline at `pos.y`
    Text {
        text: String,
        pos: Vec2,
        px: f32,
        align: TextAlign,
        color: Color,
    },
}

/// Everything to paint for one frame, back to front
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Frame {
    pub size: Vec2,
    pub commands: Vec<DrawCmd>,
}
