//! Multi-stop itinerary controller with detour/return semantics.

use crate::constants::elevation_facing;
use crate::controller::{Controller, NavError};
use crate::events::{NavEvent, Observers};
use crate::framing::{backed_off, fit_distance};
use arbor_input::{InputBinding, InputHub, MouseButton, PointerEvent};
use arbor_math::Transform;
use arbor_scene::{Camera, NodeId, SceneGraph};
use arbor_tween::{DEFAULT_DURATION_MS, TweenGroup};
use glam::Quat;
use tracing::debug;

/// One waypoint of an itinerary: the objects to frame, the orientation to
/// approach them along, and a floor on the framing distance.
#[derive(Clone, Debug)]
pub struct Stop {
    pub targets: Vec<NodeId>,
    pub orientation: Quat,
    pub min_distance: f32,
}

/// Sequences through itinerary stops and supports a temporary excursion
/// (detour) to an ad hoc target with guaranteed return to the stop that was
/// active before the detour began.
///
/// Stop transitions are driven externally through [`jump_to`]; the
/// controller's own responsibilities are the detour save/restore discipline
/// and the transition/arrival signals: [`NavEvent::TransitionChange`] is
/// toggled around every animation, and [`NavEvent::Navigate`] fires on
/// arrival with the targets of the new observed location.
///
/// [`jump_to`]: TourControls::jump_to
#[derive(Debug)]
pub struct TourControls {
    /// Ignore input and navigation requests while false.
    pub enabled: bool,
    /// Travel animation duration in milliseconds.
    pub duration_ms: f32,
    stops: Vec<Stop>,
    current: usize,
    detour_saved: Option<usize>,
    pending_arrival: Option<Vec<NodeId>>,
    tween: TweenGroup,
    transitioning: bool,
    binding: Option<InputBinding>,
    observers: Observers,
}

impl TourControls {
    #[must_use]
    pub fn new() -> Self {
        Self {
            enabled: true,
            duration_ms: DEFAULT_DURATION_MS,
            stops: Vec::new(),
            current: 0,
            detour_saved: None,
            pending_arrival: None,
            tween: TweenGroup::new(),
            transitioning: false,
            binding: None,
            observers: Observers::new(),
        }
    }

    /// Register an observer for navigate/transition events.
    pub fn on_event(&mut self, callback: impl FnMut(&NavEvent) + 'static) {
        self.observers.subscribe(callback);
    }

    /// Index of the stop the tour currently considers active.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The active stop, if the itinerary is non-empty.
    #[must_use]
    pub fn current_stop(&self) -> Option<&Stop> {
        self.stops.get(self.current)
    }

    /// True while an excursion away from the itinerary is active.
    #[must_use]
    pub fn detour_active(&self) -> bool {
        self.detour_saved.is_some()
    }

    /// Replace the itinerary. An active detour survives only if its saved
    /// stop index is still valid for the new list; otherwise the overlay is
    /// cancelled where it stands.
    pub fn set_itinerary(&mut self, stops: Vec<Stop>) {
        if let Some(saved) = self.detour_saved
            && saved >= stops.len()
        {
            debug!(saved, "itinerary shrank, cancelling detour");
            self.detour_saved = None;
        }
        if self.current >= stops.len() {
            self.current = 0;
        }
        self.stops = stops;
    }

    /// Travel to the stop at `index`. Out-of-range indices are ignored.
    /// Jumping to a stop is an explicit itinerary move, so it also clears
    /// any detour overlay.
    pub fn jump_to(&mut self, scene: &SceneGraph, camera: &Camera, index: usize) {
        if !self.enabled {
            return;
        }
        let Some(stop) = self.stops.get(index) else {
            debug!(index, len = self.stops.len(), "jump past itinerary end");
            return;
        };
        self.current = index;
        self.detour_saved = None;
        let to = frame_stop(scene, camera, stop);
        let targets = stop.targets.clone();
        debug!(index, "jump to stop");
        self.begin_travel(camera.transform, to, targets);
    }

    /// Leave the itinerary to frame `targets` at `min_distance` along
    /// `orientation`. Ignored while a detour is already active; the stop
    /// index active now is restored by [`end_detour`](Self::end_detour).
    pub fn detour(
        &mut self,
        scene: &SceneGraph,
        camera: &Camera,
        targets: &[NodeId],
        orientation: Quat,
        min_distance: f32,
    ) {
        if !self.enabled || self.detour_saved.is_some() {
            return;
        }
        self.detour_saved = Some(self.current);
        let to = frame_targets(scene, camera, targets, orientation, min_distance);
        debug!(saved = self.current, "begin detour");
        self.begin_travel(camera.transform, to, targets.to_vec());
    }

    /// Return to the stop that was active when the detour began. A no-op
    /// when no detour is active.
    pub fn end_detour(&mut self, scene: &SceneGraph, camera: &Camera) {
        if !self.enabled {
            return;
        }
        let Some(saved) = self.detour_saved.take() else {
            return;
        };
        let Some(stop) = self.stops.get(saved) else {
            return;
        };
        self.current = saved;
        let to = frame_stop(scene, camera, stop);
        let targets = stop.targets.clone();
        debug!(restored = saved, "end detour");
        self.begin_travel(camera.transform, to, targets);
    }

    fn begin_travel(&mut self, from: Transform, to: Transform, arrival_targets: Vec<NodeId>) {
        self.pending_arrival = Some(arrival_targets);
        self.transitioning = true;
        self.observers.emit(&NavEvent::TransitionChange {
            transitioning: true,
        });
        self.tween.animate(from, to, self.duration_ms);
    }
}

/// The framing pose for an itinerary stop.
fn frame_stop(scene: &SceneGraph, camera: &Camera, stop: &Stop) -> Transform {
    frame_targets(scene, camera, &stop.targets, stop.orientation, stop.min_distance)
}

/// Frame `targets` along `orientation`: bounds center, backed off by the
/// fitting distance or `min_distance`, whichever is larger.
fn frame_targets(
    scene: &SceneGraph,
    camera: &Camera,
    targets: &[NodeId],
    orientation: Quat,
    min_distance: f32,
) -> Transform {
    let bounds = scene.bounds_of(targets);
    let (center, distance) = if bounds.is_empty() {
        let center = targets
            .first()
            .map(|&target| scene.world_pose(target).0)
            .unwrap_or_default();
        (center, min_distance)
    } else {
        (
            bounds.center(),
            fit_distance(camera, bounds.size()).max(min_distance),
        )
    };
    backed_off(center, orientation, distance)
}

impl Default for TourControls {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for TourControls {
    /// Binding a plain target set collapses the itinerary to a single stop
    /// framed along the elevation-facing view. The framing itself is still
    /// driven externally via [`jump_to`](Self::jump_to).
    fn set_targets(
        &mut self,
        _scene: &SceneGraph,
        camera: &Camera,
        targets: &[NodeId],
    ) -> Result<(), NavError> {
        self.set_itinerary(vec![Stop {
            targets: targets.to_vec(),
            orientation: elevation_facing(camera.up),
            min_distance: 0.0,
        }]);
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
                PointerEvent::ButtonPressed {
                    button: MouseButton::Right,
                } => self.end_detour(scene, camera),
                PointerEvent::Resized { width, height } => {
                    camera.set_viewport(width, height);
                }
                _ => {}
            }
        }

        if self.tween.update_transform(&mut camera.transform, dt_ms) {
            self.transitioning = false;
            if let Some(targets) = self.pending_arrival.take() {
                self.observers.emit(&NavEvent::Navigate { targets });
            }
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
        self.pending_arrival = None;
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

    fn two_stop_scene() -> (SceneGraph, Camera, Vec<Stop>, NodeId) {
        let mut scene = SceneGraph::new();
        let left = scene.insert(
            None,
            SceneNode::mesh(Vec3::new(-3.0, 0.0, 0.0), Quat::IDENTITY, Vec3::splat(0.5)),
        );
        let right = scene.insert(
            None,
            SceneNode::mesh(Vec3::new(3.0, 0.0, 0.0), Quat::IDENTITY, Vec3::splat(0.5)),
        );
        let extra = scene.insert(
            None,
            SceneNode::mesh(Vec3::new(0.0, 5.0, 0.0), Quat::IDENTITY, Vec3::splat(0.5)),
        );
        let camera = Camera::new(800.0, 600.0);
        let stops = vec![
            Stop {
                targets: vec![left],
                orientation: Quat::IDENTITY,
                min_distance: 2.0,
            },
            Stop {
                targets: vec![right],
                orientation: Quat::IDENTITY,
                min_distance: 2.0,
            },
        ];
        (scene, camera, stops, extra)
    }

    fn settle(controls: &mut TourControls, camera: &mut Camera, scene: &mut SceneGraph) {
        for _ in 0..100 {
            controls.update(camera, scene, 16.0);
        }
        assert!(!controls.transitioning());
    }

    #[test]
    fn test_jump_frames_the_stop() {
        let (mut scene, mut camera, stops, _) = two_stop_scene();
        let mut controls = TourControls::new();
        controls.set_itinerary(stops);
        controls.jump_to(&scene, &camera, 1);
        assert!(controls.transitioning());
        settle(&mut controls, &mut camera, &mut scene);
        assert_eq!(controls.current_index(), 1);
        // min_distance floors the framing distance for a small target.
        let expected = Vec3::new(3.0, 0.0, 2.0);
        assert!((camera.transform.position - expected).length() < 1e-3);
    }

    #[test]
    fn test_jump_past_end_is_ignored() {
        let (scene, camera, stops, _) = two_stop_scene();
        let mut controls = TourControls::new();
        controls.set_itinerary(stops);
        controls.jump_to(&scene, &camera, 7);
        assert!(!controls.transitioning());
        assert_eq!(controls.current_index(), 0);
    }

    #[test]
    fn test_second_detour_is_ignored() {
        let (mut scene, mut camera, stops, extra) = two_stop_scene();
        let mut controls = TourControls::new();
        controls.set_itinerary(stops);
        controls.detour(&scene, &camera, &[extra], Quat::IDENTITY, 1.0);
        assert!(controls.detour_active());
        settle(&mut controls, &mut camera, &mut scene);
        let after_first = camera.transform;

        controls.detour(&scene, &camera, &[extra], Quat::from_rotation_y(1.0), 9.0);
        controls.update(&mut camera, &mut scene, 16.0);
        assert!(camera.transform.approx_eq(&after_first, 1e-5, 1e-5));
    }

    #[test]
    fn test_end_detour_without_detour_is_noop() {
        let (mut scene, mut camera, stops, _) = two_stop_scene();
        let mut controls = TourControls::new();
        controls.set_itinerary(stops);
        controls.end_detour(&scene, &camera);
        controls.update(&mut camera, &mut scene, 16.0);
        assert!(!controls.transitioning());
    }

    #[test]
    fn test_itinerary_shrink_cancels_detour() {
        let (scene, camera, stops, extra) = two_stop_scene();
        let mut controls = TourControls::new();
        controls.set_itinerary(stops.clone());
        controls.jump_to(&scene, &camera, 1);
        controls.detour(&scene, &camera, &[extra], Quat::IDENTITY, 1.0);
        assert!(controls.detour_active());

        // Shrinking below the saved index drops the overlay.
        controls.set_itinerary(stops[..1].to_vec());
        assert!(!controls.detour_active());
    }

    #[test]
    fn test_itinerary_replacement_keeps_valid_detour() {
        let (scene, camera, stops, extra) = two_stop_scene();
        let mut controls = TourControls::new();
        controls.set_itinerary(stops.clone());
        controls.detour(&scene, &camera, &[extra], Quat::IDENTITY, 1.0);
        controls.set_itinerary(stops);
        assert!(controls.detour_active(), "saved index 0 still valid");
    }
}
