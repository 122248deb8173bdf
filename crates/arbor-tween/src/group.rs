//! Per-controller animation group: one transform tween plus node fades.

use crate::easing::Easing;
use arbor_math::Transform;
use arbor_scene::{NodeId, SceneGraph};

/// Default animation duration in milliseconds.
pub const DEFAULT_DURATION_MS: f32 = 400.0;

#[derive(Clone, Debug)]
struct TransformTween {
    from: Transform,
    to: Transform,
    duration_ms: f32,
    elapsed_ms: f32,
    easing: Easing,
}

#[derive(Clone, Debug)]
struct OpacityTween {
    node: NodeId,
    from: f32,
    to: f32,
    duration_ms: f32,
    elapsed_ms: f32,
}

/// What one [`TweenGroup::update`] tick observed.
#[derive(Clone, Debug, Default)]
pub struct TweenTick {
    /// The transform tween reached its target this tick. Reported exactly
    /// once per tween; cancelled tweens never report it.
    pub finished: bool,
    /// Nodes whose fade completed this tick.
    pub completed_fades: Vec<NodeId>,
}

/// Animation group owned by a single controller.
///
/// At most one transform tween is in flight; starting a new one drops the
/// old one where its last applied frame left the target.
#[derive(Debug, Default)]
pub struct TweenGroup {
    transform: Option<TransformTween>,
    fades: Vec<OpacityTween>,
}

impl TweenGroup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start animating from `from` to `to` over `duration_ms`, cancelling
    /// everything the group was doing. Pass the target's current pose as
    /// `from`; partial progress of a replaced tween is kept, not rolled back.
    pub fn animate(&mut self, from: Transform, to: Transform, duration_ms: f32) {
        self.fades.clear();
        self.transform = Some(TransformTween {
            from,
            to: Transform::new(to.position, to.rotation),
            duration_ms: duration_ms.max(f32::EPSILON),
            elapsed_ms: 0.0,
            easing: Easing::EaseInOut,
        });
    }

    /// Fade a node's opacity to `to` over `duration_ms`.
    ///
    /// A fade toward a non-zero opacity makes the node visible at start; a
    /// fade to zero hides the node at completion, so fade-outs stay visible
    /// for their full run. One fade per node: a new fade replaces a pending
    /// one for the same node.
    pub fn animate_opacity(
        &mut self,
        graph: &mut SceneGraph,
        node: NodeId,
        to: f32,
        duration_ms: f32,
    ) {
        self.fades.retain(|fade| fade.node != node);
        let target = graph.node_mut(node);
        if to != 0.0 {
            target.visible = true;
        }
        self.fades.push(OpacityTween {
            node,
            from: target.opacity,
            to,
            duration_ms: duration_ms.max(f32::EPSILON),
            elapsed_ms: 0.0,
        });
    }

    /// Drop all pending work. Nothing is rolled back and nothing reports
    /// completion.
    pub fn cancel_all(&mut self) {
        self.transform = None;
        self.fades.clear();
    }

    /// True while a transform tween is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.transform.is_some()
    }

    /// Advance all tweens by `dt_ms`, applying the transform tween to
    /// `target` and fades to their nodes.
    pub fn update(
        &mut self,
        target: &mut Transform,
        graph: &mut SceneGraph,
        dt_ms: f32,
    ) -> TweenTick {
        TweenTick {
            finished: self.update_transform(target, dt_ms),
            completed_fades: self.update_fades(graph, dt_ms),
        }
    }

    /// Advance only the transform tween. Returns true when it reached its
    /// target this tick.
    pub fn update_transform(&mut self, target: &mut Transform, dt_ms: f32) -> bool {
        let Some(tween) = self.transform.as_mut() else {
            return false;
        };
        tween.elapsed_ms += dt_ms;
        if tween.elapsed_ms >= tween.duration_ms {
            *target = tween.to;
            self.transform = None;
            return true;
        }
        let t = tween.easing.apply(tween.elapsed_ms / tween.duration_ms);
        *target = tween.from.interpolate(&tween.to, t);
        false
    }

    /// Advance only the fades. Returns the nodes whose fade completed this
    /// tick. Usable on its own by groups that never animate a transform.
    pub fn update_fades(&mut self, graph: &mut SceneGraph, dt_ms: f32) -> Vec<NodeId> {
        let mut completed = Vec::new();
        self.fades.retain_mut(|fade| {
            fade.elapsed_ms += dt_ms;
            let node = graph.node_mut(fade.node);
            if fade.elapsed_ms >= fade.duration_ms {
                node.opacity = fade.to;
                if fade.to == 0.0 {
                    node.visible = false;
                }
                completed.push(fade.node);
                return false;
            }
            let t = Easing::EaseInOut.apply(fade.elapsed_ms / fade.duration_ms);
            node.opacity = fade.from + (fade.to - fade.from) * t;
            true
        });
        completed
    }
}
