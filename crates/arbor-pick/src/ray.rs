//! World-space rays and the perspective unprojection that creates them.

use arbor_math::Aabb;
use arbor_scene::Camera;
use glam::{Vec2, Vec3};

/// A world-space ray with normalized direction.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// The point `t` units along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Slab-test intersection. Returns the entry distance, clamped to zero
    /// when the origin is inside the box.
    #[must_use]
    pub fn intersect_aabb(&self, aabb: &Aabb) -> Option<f32> {
        if aabb.is_empty() {
            return None;
        }
        let inv = self.direction.recip();
        let t1 = (aabb.min - self.origin) * inv;
        let t2 = (aabb.max - self.origin) * inv;
        let t_near = t1.min(t2).max_element();
        let t_far = t1.max(t2).min_element();
        if t_far < t_near.max(0.0) {
            None
        } else {
            Some(t_near.max(0.0))
        }
    }
}

/// Cast a ray from the camera through a point in normalized device
/// coordinates (x right, y up, both in `-1.0..=1.0`).
#[must_use]
pub fn screen_ray(camera: &Camera, ndc: Vec2) -> Ray {
    let half_fov_tan = (camera.fov_y * 0.5).tan();
    let view_dir = Vec3::new(
        ndc.x * half_fov_tan * camera.aspect,
        ndc.y * half_fov_tan,
        -1.0,
    );
    Ray::new(
        camera.transform.position,
        camera.transform.rotation * view_dir,
    )
}
