//! Pointer and touch target tracking
//!
//! Browser events arrive in client (CSS) pixels; the simulation works in canvas
//! pixels. [`CanvasMapping`] converts between them and [`InputTracker`] keeps
//! the latest target plus whether a press is in progress.

use glam::Vec2;

use crate::config::InputMode;
use crate::sim::TickInput;

/// Client-to-canvas coordinate transform for one canvas element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasMapping {
    /// Element's top-left corner in client coordinates
    pub offset: Vec2,
    /// Element's displayed size in CSS pixels
    pub css_size: Vec2,
    /// Canvas backing-store size in pixels
    pub canvas_size: Vec2,
}

impl CanvasMapping {
    pub fn new(offset: Vec2, css_size: Vec2, canvas_size: Vec2) -> Self {
        Self {
            offset,
            css_size,
            canvas_size,
        }
    }

    /// One-to-one mapping for a canvas at the origin
    pub fn identity(canvas_size: Vec2) -> Self {
        Self::new(Vec2::ZERO, canvas_size, canvas_size)
    }

    /// Map a client position into the canvas, clamped to its edges
    pub fn to_canvas(&self, client: Vec2) -> Vec2 {
        let scale = Vec2::new(
            axis_scale(self.canvas_size.x, self.css_size.x),
            axis_scale(self.canvas_size.y, self.css_size.y),
        );
        ((client - self.offset) * scale).clamp(Vec2::ZERO, self.canvas_size.max(Vec2::ZERO))
    }
}

fn axis_scale(canvas: f32, css: f32) -> f32 {
    if css > 0.0 { canvas / css } else { 1.0 }
}

/// Latest pointer/touch target
#[derive(Debug, Clone)]
pub struct InputTracker {
    mode: InputMode,
    mapping: CanvasMapping,
    target: Vec2,
    active: bool,
}

impl InputTracker {
    /// Start with the target at `initial` (usually the player's spawn point)
    pub fn new(mode: InputMode, mapping: CanvasMapping, initial: Vec2) -> Self {
        Self {
            mode,
            mapping,
            target: initial,
            active: false,
        }
    }

    /// Replace the coordinate transform after a layout change
    pub fn set_mapping(&mut self, mapping: CanvasMapping) {
        self.mapping = mapping;
    }

    /// Move the target without an input event (e.g. after a reset)
    pub fn set_target(&mut self, canvas_pos: Vec2) {
        self.target = canvas_pos;
    }

    /// Mouse button down / touch start
    pub fn press(&mut self, client: Vec2) {
        self.active = true;
        self.target = self.mapping.to_canvas(client);
    }

    /// Mouse or touch move
    pub fn move_to(&mut self, client: Vec2) {
        if self.active || self.mode == InputMode::Follow {
            self.target = self.mapping.to_canvas(client);
        }
    }

    /// Mouse button up / touch end; the target stays where it was
    pub fn release(&mut self) {
        self.active = false;
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the player-to-target guide line should be drawn
    pub fn show_guide(&self) -> bool {
        self.active || self.mode == InputMode::Follow
    }

    pub fn tick_input(&self) -> TickInput {
        TickInput {
            target: self.target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(mode: InputMode) -> InputTracker {
        InputTracker::new(
            mode,
            CanvasMapping::identity(Vec2::new(800.0, 600.0)),
            Vec2::new(400.0, 300.0),
        )
    }

    #[test]
    fn test_mapping_scales_and_offsets() {
        // Canvas of 800x600 displayed at 400x300, 10px from the page corner
        let mapping = CanvasMapping::new(
            Vec2::new(10.0, 10.0),
            Vec2::new(400.0, 300.0),
            Vec2::new(800.0, 600.0),
        );
        assert_eq!(mapping.to_canvas(Vec2::new(110.0, 60.0)), Vec2::new(200.0, 100.0));
    }

    #[test]
    fn test_mapping_clamps_outside_points() {
        let mapping = CanvasMapping::identity(Vec2::new(800.0, 600.0));
        assert_eq!(mapping.to_canvas(Vec2::new(-20.0, 700.0)), Vec2::new(0.0, 600.0));
    }

    #[test]
    fn test_mapping_zero_css_size() {
        let mapping = CanvasMapping::new(Vec2::ZERO, Vec2::ZERO, Vec2::new(800.0, 600.0));
        assert_eq!(mapping.to_canvas(Vec2::new(50.0, 60.0)), Vec2::new(50.0, 60.0));
    }

    #[test]
    fn test_move_ignored_until_pressed() {
        let mut input = tracker(InputMode::WhilePressed);
        input.move_to(Vec2::new(10.0, 10.0));
        assert_eq!(input.target(), Vec2::new(400.0, 300.0));
        assert!(!input.show_guide());

        input.press(Vec2::new(100.0, 100.0));
        assert!(input.is_active());
        assert_eq!(input.target(), Vec2::new(100.0, 100.0));

        input.move_to(Vec2::new(150.0, 120.0));
        assert_eq!(input.target(), Vec2::new(150.0, 120.0));
        assert!(input.show_guide());
    }

    #[test]
    fn test_release_keeps_target() {
        let mut input = tracker(InputMode::WhilePressed);
        input.press(Vec2::new(100.0, 100.0));
        input.release();
        input.move_to(Vec2::new(700.0, 500.0));
        assert!(!input.is_active());
        assert_eq!(input.tick_input().target, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_follow_mode_tracks_every_move() {
        let mut input = tracker(InputMode::Follow);
        input.move_to(Vec2::new(20.0, 30.0));
        assert_eq!(input.target(), Vec2::new(20.0, 30.0));
        assert!(input.show_guide());
    }

    #[test]
    fn test_repeated_events_idempotent() {
        let mut input = tracker(InputMode::WhilePressed);
        input.press(Vec2::new(50.0, 50.0));
        input.press(Vec2::new(50.0, 50.0));
        input.move_to(Vec2::new(60.0, 60.0));
        input.move_to(Vec2::new(60.0, 60.0));
        assert!(input.is_active());
        assert_eq!(input.target(), Vec2::new(60.0, 60.0));
    }
}
