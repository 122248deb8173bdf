//! Perspective camera whose transform the live controller animates.

use arbor_math::Transform;
use glam::{Mat4, Vec3};

const DEFAULT_FOV_Y_DEGREES: f32 = 70.0;
const NEAR: f32 = 0.1;
const FAR: f32 = 2000.0;

/// A perspective camera.
///
/// The embedding application owns exactly one `Camera`; its `transform` is
/// mutated only by the live navigation controller's update step.
#[derive(Clone, Debug)]
pub struct Camera {
    /// World-space pose. The view matrix is this pose inverted.
    pub transform: Transform,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect: f32,
    /// Near clip plane distance (positive).
    pub near: f32,
    /// Far clip plane distance (positive, > near).
    pub far: f32,
    /// World up axis used for look-at style rotations.
    pub up: Vec3,
}

impl Camera {
    /// Create a camera with the default 70° vertical field of view.
    #[must_use]
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self::with_fov(
            DEFAULT_FOV_Y_DEGREES.to_radians(),
            viewport_width,
            viewport_height,
        )
    }

    /// Create a camera with an explicit vertical fov in radians.
    #[must_use]
    pub fn with_fov(fov_y: f32, viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            transform: Transform::IDENTITY,
            fov_y,
            aspect: viewport_width / viewport_height,
            near: NEAR,
            far: FAR,
            up: Vec3::Y,
        }
    }

    /// Recompute the aspect ratio for a resized viewport.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.aspect = width / height;
    }

    /// View matrix: the inverse of the camera's world transform.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.transform.rotation, self.transform.position).inverse()
    }

    /// Right-handed perspective projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }
}
