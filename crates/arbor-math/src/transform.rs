//! A camera/object pose: position plus unit-quaternion rotation.

use glam::{Quat, Vec3};

/// A world-space pose.
///
/// Invariant: `rotation` is a unit quaternion before it is applied or
/// compared. Constructors normalize; code that mutates `rotation` directly
/// is responsible for re-normalizing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Position in world units.
    pub position: Vec3,
    /// Orientation as a unit quaternion.
    pub rotation: Quat,
}

impl Transform {
    /// The identity pose: origin, no rotation.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Create a pose, normalizing the rotation.
    #[must_use]
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation: rotation.normalize(),
        }
    }

    /// Interpolate between two poses: position lerp, rotation slerp.
    ///
    /// `t` outside `0.0..=1.0` is clamped.
    #[must_use]
    pub fn interpolate(&self, to: &Transform, t: f32) -> Transform {
        let t = t.clamp(0.0, 1.0);
        Transform {
            position: self.position.lerp(to.position, t),
            rotation: self.rotation.slerp(to.rotation, t),
        }
    }

    /// The view direction (-Z) rotated into world space.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// The local +Z axis rotated into world space; framing code offsets the
    /// camera along this axis to back away from a subject it faces.
    #[must_use]
    pub fn back(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Tolerance comparison: positions within `pos_eps` on every axis,
    /// rotations within `rot_eps` of representing the same orientation
    /// (q and -q compare equal).
    #[must_use]
    pub fn approx_eq(&self, other: &Transform, pos_eps: f32, rot_eps: f32) -> bool {
        (self.position - other.position).abs().max_element() <= pos_eps
            && 1.0 - self.rotation.dot(other.rotation).abs() <= rot_eps
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn test_new_normalizes_rotation() {
        let t = Transform::new(Vec3::ZERO, Quat::from_xyzw(0.0, 2.0, 0.0, 0.0));
        assert!((t.rotation.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_interpolate_endpoints() {
        let a = Transform::IDENTITY;
        let b = Transform::new(Vec3::new(10.0, 0.0, 0.0), Quat::from_rotation_y(FRAC_PI_2));
        assert!(a.interpolate(&b, 0.0).approx_eq(&a, 1e-6, 1e-6));
        assert!(a.interpolate(&b, 1.0).approx_eq(&b, 1e-4, 1e-6));
    }

    #[test]
    fn test_interpolate_midpoint() {
        let a = Transform::IDENTITY;
        let b = Transform::new(Vec3::new(10.0, 0.0, 0.0), Quat::from_rotation_y(FRAC_PI_2));
        let mid = a.interpolate(&b, 0.5);
        assert!((mid.position.x - 5.0).abs() < 1e-5);
        let expected = Quat::from_rotation_y(FRAC_PI_4);
        assert!(1.0 - mid.rotation.dot(expected).abs() < 1e-5);
    }

    #[test]
    fn test_interpolate_clamps_t() {
        let a = Transform::IDENTITY;
        let b = Transform::new(Vec3::X, Quat::IDENTITY);
        assert!(a.interpolate(&b, 2.0).approx_eq(&b, 1e-6, 1e-6));
        assert!(a.interpolate(&b, -1.0).approx_eq(&a, 1e-6, 1e-6));
    }

    #[test]
    fn test_approx_eq_accepts_negated_quaternion() {
        let q = Quat::from_rotation_y(1.0);
        let a = Transform::new(Vec3::ZERO, q);
        let b = Transform::new(Vec3::ZERO, -q);
        assert!(a.approx_eq(&b, 1e-6, 1e-6));
    }

    #[test]
    fn test_forward_is_view_direction() {
        let t = Transform::new(Vec3::ZERO, Quat::from_rotation_y(FRAC_PI_2));
        assert!((t.forward() - Vec3::NEG_X).length() < 1e-6);
        assert!((t.back() - Vec3::X).length() < 1e-6);
    }
}
