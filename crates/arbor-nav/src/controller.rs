//! The capability set every navigation controller implements.

use arbor_input::InputHub;
use arbor_scene::{Camera, NodeId, NodeKind, SceneGraph};

/// Errors surfaced by controller configuration.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// The controller needs at least one target to derive its approach
    /// orientation from.
    #[error("at least one target is required")]
    EmptyTargets,
}

/// The shared controller contract.
///
/// Exactly one controller is live at a time; the embedding frame loop calls
/// that controller's [`update`](Controller::update) once per tick and no
/// controller touches the camera transform anywhere else.
pub trait Controller {
    /// Bind the objects this controller navigates among.
    fn set_targets(
        &mut self,
        scene: &SceneGraph,
        camera: &Camera,
        targets: &[NodeId],
    ) -> Result<(), NavError>;

    /// Drain queued input and advance animations by `dt_ms`.
    fn update(&mut self, camera: &mut Camera, scene: &mut SceneGraph, dt_ms: f32);

    /// Subscribe to the input hub. Connecting again replaces the previous
    /// subscription.
    fn connect(&mut self, hub: &mut InputHub);

    /// Detach from input and drop pending animation work.
    fn dispose(&mut self);

    /// True while an animation is in flight.
    fn transitioning(&self) -> bool;
}

/// The default pick filter: keep solid node geometry, drop limbs and groups.
#[must_use]
pub fn mesh_filter(graph: &SceneGraph, node: NodeId) -> bool {
    graph.node(node).kind == NodeKind::Mesh
}
