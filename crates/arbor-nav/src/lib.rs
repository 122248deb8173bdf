//! Camera navigation state machines for the node-tree scene.
//!
//! Four controller variants share one capability set (bind targets, advance
//! per frame, connect input, dispose): [`SnapControls`] travels to clicked
//! nodes with linear history, [`TargetControls`] adds select/deselect
//! notifications and an averaged approach orientation, [`FitControls`]
//! auto-frames a target set, and [`TourControls`] sequences an itinerary
//! with detour/return semantics. Exactly one controller is live at a time;
//! the camera transform is mutated only inside the live controller's
//! `update`.

mod constants;
mod controller;
mod events;
mod fit;
mod framing;
mod history;
mod snap;
mod target;
mod tour;

pub use constants::{
    CAMERA_OFFSET, ELEVATION_FORWARD, SNAP_LOOK_ROTATION, SNAP_OFFSET, elevation_facing,
    plan_forward,
};
pub use controller::{Controller, NavError, mesh_filter};
pub use events::{NavEvent, Observers};
pub use fit::{FitAxis, FitControls};
pub use history::History;
pub use snap::SnapControls;
pub use target::TargetControls;
pub use tour::{Stop, TourControls};
