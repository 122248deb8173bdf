//! Time-driven interpolation of camera transforms and node opacities.
//!
//! Each navigation controller owns one [`TweenGroup`]. Starting a transform
//! tween cancels whatever the group was doing; cancelled work is dropped
//! where it stands, never rolled back, and never reports completion.

mod easing;
mod group;

pub use easing::Easing;
pub use group::{DEFAULT_DURATION_MS, TweenGroup, TweenTick};
