//! Click-to-travel controller with linear pose history.

use crate::constants::{SNAP_LOOK_ROTATION, SNAP_OFFSET};
use crate::controller::{Controller, NavError, mesh_filter};
use crate::history::History;
use arbor_input::{InputBinding, InputHub, MouseButton, PointerEvent};
use arbor_math::Transform;
use arbor_pick::{raycast, screen_ray};
use arbor_scene::{Camera, NodeId, SceneGraph};
use arbor_tween::{DEFAULT_DURATION_MS, TweenGroup};
use glam::{Vec2, Vec3};
use tracing::debug;

/// Click-to-travel navigation.
///
/// A primary click on a bound node animates the camera to a head-on pose a
/// fixed offset in front of it and appends that pose to the history. The
/// wheel steps back and forward through visited poses; a secondary click
/// returns to where the excursion started and clears the history.
#[derive(Debug)]
pub struct SnapControls {
    /// Ignore all input while false.
    pub enabled: bool,
    /// Travel animation duration in milliseconds.
    pub duration_ms: f32,
    /// Camera distance in front of a snapped node.
    pub snap_offset: f32,
    targets: Vec<NodeId>,
    pointer_ndc: Vec2,
    history: History,
    tween: TweenGroup,
    transitioning: bool,
    binding: Option<InputBinding>,
}

impl SnapControls {
    #[must_use]
    pub fn new() -> Self {
        Self {
            enabled: true,
            duration_ms: DEFAULT_DURATION_MS,
            snap_offset: SNAP_OFFSET,
            targets: Vec::new(),
            pointer_ndc: Vec2::ZERO,
            history: History::new(),
            tween: TweenGroup::new(),
            transitioning: false,
            binding: None,
        }
    }

    /// The visited-pose history, for embedding UI (breadcrumb depth etc.).
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    fn animate_to(&mut self, from: Transform, to: Transform) {
        self.transitioning = true;
        self.tween.animate(from, to, self.duration_ms);
    }

    fn on_primary(&mut self, camera: &Camera, scene: &SceneGraph) {
        let ray = screen_ray(camera, self.pointer_ndc);
        let Some(matched) = raycast(scene, &self.targets, &ray)
            .into_iter()
            .map(|hit| hit.node)
            .find(|&node| mesh_filter(scene, node))
        else {
            return;
        };

        let (position, _) = scene.world_pose(matched);
        let stop = Transform::new(
            position + SNAP_LOOK_ROTATION * Vec3::Z * self.snap_offset,
            SNAP_LOOK_ROTATION,
        );

        if self.history.is_empty() {
            self.history.push(camera.transform);
        }
        self.history.push(stop);

        debug!(?matched, depth = self.history.len(), "snap to node");
        self.animate_to(camera.transform, stop);
    }

    fn on_secondary(&mut self, camera: &Camera) {
        if let Some(first) = self.history.first().copied() {
            self.animate_to(camera.transform, first);
        }
        self.history.reset();
    }

    fn on_wheel(&mut self, camera: &Camera, lines: f32) {
        if self.transitioning || lines == 0.0 {
            return;
        }
        let stepped = if lines > 0.0 {
            self.history.step_forward()
        } else {
            self.history.step_back()
        };
        if let Some(to) = stepped.copied() {
            debug!(cursor = ?self.history.cursor(), "snap history step");
            self.animate_to(camera.transform, to);
        }
    }
}

impl Default for SnapControls {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for SnapControls {
    /// Rebinding targets drops the history; the old poses belong to objects
    /// that may no longer be navigable.
    fn set_targets(
        &mut self,
        _scene: &SceneGraph,
        _camera: &Camera,
        targets: &[NodeId],
    ) -> Result<(), NavError> {
        self.targets = targets.to_vec();
        self.history.reset();
        Ok(())
    }

    fn update(&mut self, camera: &mut Camera, scene: &mut SceneGraph, dt_ms: f32) {
        let events = self
            .binding
            .as_ref()
            .map(InputBinding::drain)
            .unwrap_or_default();
        for event in events {
            if !self.enabled {
                continue;
            }
            match event {
                PointerEvent::CursorMoved { ndc } => self.pointer_ndc = ndc,
                PointerEvent::ButtonPressed {
                    button: MouseButton::Left,
                } => self.on_primary(camera, scene),
                PointerEvent::ButtonPressed {
                    button: MouseButton::Right,
                } => self.on_secondary(camera),
                PointerEvent::Wheel { lines } => self.on_wheel(camera, lines),
                _ => {}
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
