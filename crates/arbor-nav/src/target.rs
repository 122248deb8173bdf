//! Click-to-select controller with history and select/deselect events.

use crate::constants::{CAMERA_OFFSET, elevation_facing};
use crate::controller::{Controller, NavError, mesh_filter};
use crate::events::{NavEvent, Observers};
use crate::history::History;
use arbor_input::{InputBinding, InputHub, MouseButton, PointerEvent};
use arbor_math::{Transform, average_rotation};
use arbor_pick::{Picker, screen_ray};
use arbor_scene::{Camera, NodeId, SceneGraph};
use arbor_tween::{DEFAULT_DURATION_MS, TweenGroup};
use glam::{Quat, Vec2, Vec3};
use tracing::debug;

/// Click-to-select navigation.
///
/// Shares the snap controller's history and wheel mechanics, and adds a
/// selection channel: new selections emit [`NavEvent::Select`], repeat
/// clicks on the selected node are swallowed, and clearing the selection
/// emits [`NavEvent::Deselect`] before the history is dropped. Every
/// framing animation approaches along one cached rotation, the average of
/// the bound targets' world rotations blended halfway toward the
/// elevation-facing view.
#[derive(Debug)]
pub struct TargetControls {
    /// Ignore all input while false.
    pub enabled: bool,
    /// Travel animation duration in milliseconds.
    pub duration_ms: f32,
    /// Camera distance in front of a selected node.
    pub camera_offset: f32,
    targets: Vec<NodeId>,
    approach_rotation: Quat,
    pointer_ndc: Vec2,
    picker: Picker,
    history: History,
    tween: TweenGroup,
    transitioning: bool,
    binding: Option<InputBinding>,
    observers: Observers,
}

impl TargetControls {
    #[must_use]
    pub fn new() -> Self {
        Self {
            enabled: true,
            duration_ms: DEFAULT_DURATION_MS,
            camera_offset: CAMERA_OFFSET,
            targets: Vec::new(),
            approach_rotation: Quat::IDENTITY,
            pointer_ndc: Vec2::ZERO,
            picker: Picker::new(),
            history: History::new(),
            tween: TweenGroup::new(),
            transitioning: false,
            binding: None,
            observers: Observers::new(),
        }
    }

    /// Register an observer for select/deselect/transition events.
    pub fn on_event(&mut self, callback: impl FnMut(&NavEvent) + 'static) {
        self.observers.subscribe(callback);
    }

    /// The node under the cursor, if any.
    #[must_use]
    pub fn hovered(&self) -> Option<NodeId> {
        self.picker.hovered()
    }

    /// The selected node, if any.
    #[must_use]
    pub fn selected(&self) -> Option<NodeId> {
        self.picker.selected()
    }

    /// The visited-pose history.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The rotation every framing animation will approach along, cached by
    /// the last `set_targets`.
    #[must_use]
    pub fn approach_rotation(&self) -> Quat {
        self.approach_rotation
    }

    fn animate_to(&mut self, from: Transform, to: Transform) {
        self.transitioning = true;
        self.observers.emit(&NavEvent::TransitionChange {
            transitioning: true,
        });
        self.tween.animate(from, to, self.duration_ms);
    }

    fn on_hover(&mut self, camera: &Camera, scene: &SceneGraph) {
        let ray = screen_ray(camera, self.pointer_ndc);
        self.picker.pick_hover(scene, &self.targets, &ray, mesh_filter);
    }

    fn on_primary(&mut self, camera: &Camera, scene: &SceneGraph) {
        let ray = screen_ray(camera, self.pointer_ndc);
        let result = self
            .picker
            .pick_select(scene, &self.targets, &ray, mesh_filter);
        let Some(node) = result.matched else {
            return;
        };
        if result.repeat {
            return;
        }

        let (position, _) = scene.world_pose(node);
        let stop = Transform::new(
            position + self.approach_rotation * Vec3::Z * self.camera_offset,
            self.approach_rotation,
        );

        if self.history.is_empty() {
            self.history.push(camera.transform);
        }
        self.history.push(stop);

        debug!(?node, depth = self.history.len(), "select node");
        self.observers.emit(&NavEvent::Select { node });
        self.animate_to(camera.transform, stop);
    }

    fn on_secondary(&mut self, camera: &Camera) {
        if let Some(first) = self.history.first().copied() {
            self.animate_to(camera.transform, first);
        }
        debug!("clear selection");
        self.observers.emit(&NavEvent::Deselect);
        self.history.reset();
        self.picker.set_selected(None);
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
        let Some(to) = stepped.copied() else {
            return;
        };
        // Arriving back at the excursion start drops the selection.
        if self.history.cursor() == Some(0) {
            self.observers.emit(&NavEvent::Deselect);
            self.picker.set_selected(None);
        }
        self.animate_to(camera.transform, to);
    }
}

impl Default for TargetControls {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for TargetControls {
    /// Binding targets recomputes the cached approach rotation, so the set
    /// must not be empty. The history and both pick channels reset.
    fn set_targets(
        &mut self,
        scene: &SceneGraph,
        camera: &Camera,
        targets: &[NodeId],
    ) -> Result<(), NavError> {
        if targets.is_empty() {
            return Err(NavError::EmptyTargets);
        }
        self.targets = targets.to_vec();
        self.history.reset();
        self.picker = Picker::new();

        let rotations: Vec<Quat> = targets
            .iter()
            .map(|&target| scene.world_pose(target).1)
            .collect();
        self.approach_rotation = average_rotation(&rotations)
            .slerp(elevation_facing(camera.up), 0.5)
            .normalize();
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
                PointerEvent::CursorMoved { ndc } => {
                    self.pointer_ndc = ndc;
                    self.on_hover(camera, scene);
                }
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
            self.observers.emit(&NavEvent::TransitionChange {
                transitioning: false,
            });
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
