//! Framing math shared by the fit and tour controllers.

use arbor_math::Transform;
use arbor_scene::Camera;
use glam::{Quat, Vec3};

/// Distance at which a box of `size`, seen through `camera`, fills the
/// frustum along its tighter lateral extent: the box height when the box is
/// narrower than the viewport, the aspect-corrected width otherwise.
#[must_use]
pub(crate) fn fit_distance(camera: &Camera, size: Vec3) -> f32 {
    let height_to_fit = if size.x / size.y < camera.aspect {
        size.y
    } else {
        size.x / camera.aspect
    };
    (height_to_fit * 0.5) / (camera.fov_y * 0.5).tan()
}

/// The pose `distance` out from `center` along the rotation's +Z axis,
/// oriented by that rotation.
#[must_use]
pub(crate) fn backed_off(center: Vec3, rotation: Quat, distance: f32) -> Transform {
    let rotation = rotation.normalize();
    Transform::new(center + rotation * Vec3::Z * distance, rotation)
}
