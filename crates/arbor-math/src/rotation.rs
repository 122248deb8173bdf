//! Rotation blending helpers for approach-orientation computation.

use glam::{Quat, Vec3};
use std::f32::consts::PI;

/// Blend a set of rotations into one by iterative slerp.
///
/// Seeds with the first rotation, then blends the element at overall index
/// `i` in with weight `1/(i+1)` (second element 1/2, third 1/3, ...). This
/// is a running blend, not a barycentric mean: it is order-dependent for
/// three or more inputs, which is acceptable for the small, roughly-coherent
/// sets callers pass. Averaging two rotations yields the halfway slerp.
///
/// # Panics
/// Panics if `rotations` is empty.
#[must_use]
pub fn average_rotation(rotations: &[Quat]) -> Quat {
    let (first, rest) = rotations
        .split_first()
        .expect("average_rotation requires at least one rotation");
    let mut blended = *first;
    for (i, q) in rest.iter().enumerate() {
        blended = blended.slerp(*q, 1.0 / (i as f32 + 2.0));
    }
    blended.normalize()
}

/// Rotate `q` half a turn about `up`: the orientation that looks back at a
/// subject framed with `q`.
#[must_use]
pub fn facing_flip(up: Vec3, q: Quat) -> Quat {
    (q * Quat::from_axis_angle(up, PI)).normalize()
}
