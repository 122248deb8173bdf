//! Shared view constants for approach and framing orientations.

use arbor_math::facing_flip;
use glam::{Quat, Vec3};

/// Distance between the camera and a node it snapped to.
pub const SNAP_OFFSET: f32 = 1.0;

/// Default distance between the camera and a selected node.
pub const CAMERA_OFFSET: f32 = 1.0;

/// Rotation the camera holds when snapping to face a single node head-on.
pub const SNAP_LOOK_ROTATION: Quat = Quat::IDENTITY;

/// Board-forward orientation of an elevation view. Camera rotations that
/// look *at* a board framed this way are derived via [`elevation_facing`].
pub const ELEVATION_FORWARD: Quat = Quat::IDENTITY;

/// Camera rotation that looks back at a board framed in elevation.
#[must_use]
pub fn elevation_facing(up: Vec3) -> Quat {
    facing_flip(up, ELEVATION_FORWARD)
}

/// Camera rotation used by plan-view framings.
#[must_use]
pub fn plan_forward() -> Quat {
    Quat::from_xyzw(0.0, 1.0, 0.0, -1.0).normalize()
}
