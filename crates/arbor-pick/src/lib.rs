//! Pointer picking: screen rays, subtree raycasts, and the hover/select
//! channel bookkeeping that turns raw intersections into pick results.

mod picker;
mod ray;

pub use picker::{Hit, PickResult, Picker, raycast};
pub use ray::{Ray, screen_ray};
