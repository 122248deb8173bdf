//! Transforms, bounding boxes, and rotation blending for the arbor camera core.

mod aabb;
mod rotation;
mod transform;

pub use aabb::Aabb;
pub use rotation::{average_rotation, facing_flip};
pub use transform::Transform;
