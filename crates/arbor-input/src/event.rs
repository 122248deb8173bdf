//! Pointer event shapes and the window-to-NDC conversions behind them.

use glam::Vec2;
use winit::event::{MouseButton, MouseScrollDelta};

/// A pointer interaction, normalized for consumption by controllers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Cursor moved. The position is in normalized device coordinates
    /// (x right, y up, both in `-1.0..=1.0`).
    CursorMoved { ndc: Vec2 },
    /// A mouse button went down.
    ButtonPressed { button: MouseButton },
    /// Scroll wheel movement in line units; positive scrolls up.
    Wheel { lines: f32 },
    /// The viewport changed size (logical pixels).
    Resized { width: f32, height: f32 },
}

/// Convert a window-space cursor position (origin top-left, y down) into
/// normalized device coordinates (origin center, y up).
#[must_use]
pub fn window_to_ndc(position: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        (position.x / width) * 2.0 - 1.0,
        -(position.y / height) * 2.0 + 1.0,
    )
}

/// Collapse a winit scroll delta to line units. Pixel deltas are normalized
/// at ~40 pixels per line.
#[must_use]
pub fn scroll_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_x, y) => y,
        MouseScrollDelta::PixelDelta(pos) => (pos.y / 40.0) as f32,
    }
}
