//! Auto-framing controller: fit a target set into view, no picking.

use crate::constants::{elevation_facing, plan_forward};
use crate::controller::{Controller, NavError};
use crate::framing::{backed_off, fit_distance};
use arbor_input::{InputBinding, InputHub, PointerEvent};
use arbor_math::{Aabb, Transform};
use arbor_scene::{Camera, NodeId, SceneGraph};
use arbor_tween::{DEFAULT_DURATION_MS, TweenGroup};
use glam::Quat;
use tracing::debug;

/// Which canonical view a fit controller frames, and how far it backs off
/// past the exact fitting distance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FitAxis {
    /// Face the boards from the front.
    Elevation,
    /// Look along the plan-view axis.
    Plan,
}

impl FitAxis {
    /// Extra clearance added beyond the exact fitting distance.
    #[must_use]
    pub fn clearance(self) -> f32 {
        match self {
            FitAxis::Elevation => 4.0,
            FitAxis::Plan => 2.0,
        }
    }

    /// The canonical camera rotation for this view.
    #[must_use]
    pub fn rotation(self, camera: &Camera) -> Quat {
        match self {
            FitAxis::Elevation => elevation_facing(camera.up),
            FitAxis::Plan => plan_forward(),
        }
    }
}

/// Frames whatever `set_targets` hands it: synchronously computes the
/// enclosing bounds, derives the distance that fits the larger lateral
/// extent into the field of view plus the variant's clearance, and animates
/// there. Stateless with respect to history. Refits when the viewport
/// resizes.
#[derive(Debug)]
pub struct FitControls {
    /// Ignore input and skip fits while false.
    pub enabled: bool,
    /// Framing animation duration in milliseconds.
    pub duration_ms: f32,
    axis: FitAxis,
    targets: Vec<NodeId>,
    tween: TweenGroup,
    transitioning: bool,
    binding: Option<InputBinding>,
}

impl FitControls {
    #[must_use]
    pub fn new(axis: FitAxis) -> Self {
        Self {
            enabled: true,
            duration_ms: DEFAULT_DURATION_MS,
            axis,
            targets: Vec::new(),
            tween: TweenGroup::new(),
            transitioning: false,
            binding: None,
        }
    }

    /// The view variant this controller frames.
    #[must_use]
    pub fn axis(&self) -> FitAxis {
        self.axis
    }

    /// The framing pose for `bounds` seen through `camera`.
    fn framing(&self, camera: &Camera, bounds: &Aabb) -> Transform {
        let distance = fit_distance(camera, bounds.size()) + self.axis.clearance();
        backed_off(bounds.center(), self.axis.rotation(camera), distance)
    }

    fn refit(&mut self, camera: &Camera, scene: &SceneGraph) {
        if !self.enabled || self.targets.is_empty() {
            return;
        }
        let bounds = scene.bounds_of(&self.targets);
        if bounds.is_empty() {
            return;
        }
        let to = self.framing(camera, &bounds);
        debug!(axis = ?self.axis, distance = to.position.distance(bounds.center()), "fit targets");
        self.transitioning = true;
        self.tween.animate(camera.transform, to, self.duration_ms);
    }
}

impl Controller for FitControls {
    /// An empty set is a defined no-op; a non-empty set starts the framing
    /// animation immediately.
    fn set_targets(
        &mut self,
        scene: &SceneGraph,
        camera: &Camera,
        targets: &[NodeId],
    ) -> Result<(), NavError> {
        self.targets = targets.to_vec();
        self.refit(camera, scene);
        Ok(())
    }

    fn update(&mut self, camera: &mut Camera, scene: &mut SceneGraph, dt_ms: f32) {
        let events = self
            .binding
            .as_ref()
            .map(InputBinding::drain)
            .unwrap_or_default();
        for event in events {
            if let PointerEvent::Resized { width, height } = event {
                camera.set_viewport(width, height);
                self.refit(camera, scene);
            }
        }

        if self.tween.update_transform(&mut camera.transform, dt_ms) {
            self.transitioning = false;
        }
    }

    fn connect(&mut self, hub: &mut InputHub) {
        self.binding = Some(hub.subscribe());
    }

    fn dispose(&mut self) {
        self.binding = None;
        self.tween.cancel_all();
        self.transitioning = false;
    }

    fn transitioning(&self) -> bool {
        self.transitioning
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_scene::SceneNode;
    use glam::Vec3;
    use std::f32::consts::FRAC_PI_2;

    fn settle(controls: &mut FitControls, camera: &mut Camera, scene: &mut SceneGraph) {
        for _ in 0..100 {
            controls.update(camera, scene, 16.0);
        }
        assert!(!controls.transitioning());
    }

    fn board(scene: &mut SceneGraph) -> NodeId {
        let root = scene.insert(None, SceneNode::group(Vec3::ZERO, Quat::IDENTITY));
        scene.insert(
            Some(root),
            SceneNode::mesh(Vec3::new(-1.5, 0.0, 0.0), Quat::IDENTITY, Vec3::splat(0.5)),
        );
        scene.insert(
            Some(root),
            SceneNode::mesh(Vec3::new(1.5, 1.0, 0.0), Quat::IDENTITY, Vec3::splat(0.5)),
        );
        root
    }

    #[test]
    fn test_elevation_fit_faces_bounds_center() {
        let mut scene = SceneGraph::new();
        let root = board(&mut scene);
        let mut camera = Camera::with_fov(FRAC_PI_2, 100.0, 100.0);
        let mut controls = FitControls::new(FitAxis::Elevation);
        controls
            .set_targets(&scene, &camera, &[root])
            .expect("fit never fails");
        assert!(controls.transitioning(), "fit starts synchronously");
        settle(&mut controls, &mut camera, &mut scene);

        let bounds = scene.bounds_of(&[root]);
        let center = bounds.center();
        // 90° fov, square viewport: width 4 drives the distance (2.0),
        // plus the elevation clearance.
        let expected_distance = 2.0 + FitAxis::Elevation.clearance();
        let offset = camera.transform.position - center;
        assert!((offset.length() - expected_distance).abs() < 1e-3);
        // The camera looks back at the center.
        let view = camera.transform.forward();
        assert!((view + offset.normalize()).length() < 1e-4);
    }

    #[test]
    fn test_plan_fit_uses_plan_rotation_and_clearance() {
        let mut scene = SceneGraph::new();
        let root = board(&mut scene);
        let mut camera = Camera::with_fov(FRAC_PI_2, 100.0, 100.0);
        let mut controls = FitControls::new(FitAxis::Plan);
        controls
            .set_targets(&scene, &camera, &[root])
            .expect("fit never fails");
        settle(&mut controls, &mut camera, &mut scene);

        assert!(camera.transform.rotation.angle_between(plan_forward()) < 1e-4);
        let center = scene.bounds_of(&[root]).center();
        let expected_distance = 2.0 + FitAxis::Plan.clearance();
        assert!(
            ((camera.transform.position - center).length() - expected_distance).abs() < 1e-3
        );
    }

    #[test]
    fn test_empty_targets_is_noop() {
        let mut scene = SceneGraph::new();
        let mut camera = Camera::new(800.0, 600.0);
        let before = camera.transform;
        let mut controls = FitControls::new(FitAxis::Elevation);
        controls
            .set_targets(&scene, &camera, &[])
            .expect("fit never fails");
        controls.update(&mut camera, &mut scene, 16.0);
        assert!(!controls.transitioning());
        assert!(camera.transform.approx_eq(&before, 1e-6, 1e-6));
    }

    #[test]
    fn test_resize_recomputes_aspect_and_refits() {
        let mut scene = SceneGraph::new();
        let root = board(&mut scene);
        let mut camera = Camera::with_fov(FRAC_PI_2, 100.0, 100.0);
        let mut hub = InputHub::new(100.0, 100.0);
        let mut controls = FitControls::new(FitAxis::Elevation);
        controls.connect(&mut hub);
        controls
            .set_targets(&scene, &camera, &[root])
            .expect("fit never fails");
        settle(&mut controls, &mut camera, &mut scene);
        let wide_distance = (camera.transform.position - scene.bounds_of(&[root]).center()).length();

        // Halving the viewport width makes the box relatively wider, so the
        // camera must back off further.
        hub.resized(50.0, 100.0);
        controls.update(&mut camera, &mut scene, 16.0);
        assert!((camera.aspect - 0.5).abs() < 1e-6);
        settle(&mut controls, &mut camera, &mut scene);
        let narrow_distance =
            (camera.transform.position - scene.bounds_of(&[root]).center()).length();
        assert!(narrow_distance > wide_distance);
    }
}
