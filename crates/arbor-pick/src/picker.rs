//! Subtree raycasting and hover/select channel state.

use crate::ray::Ray;
use arbor_scene::{NodeId, SceneGraph};

/// One ray/node intersection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub node: NodeId,
    /// Distance from the ray origin to the entry point.
    pub distance: f32,
}

/// Outcome of resolving a pointer event against the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickResult {
    /// The nearest surviving candidate, if any.
    pub matched: Option<NodeId>,
    /// True when `matched` equals the channel's previously resolved value.
    pub repeat: bool,
    /// The channel's previously resolved value.
    pub previous: Option<NodeId>,
}

/// Intersect the subtrees of every root in `roots`, nearest hit first.
///
/// Invisible nodes are skipped (their children are still visited; a hidden
/// group does not hide its subtree from picking, matching how fades hide
/// single nodes). Zero-extent nodes never intersect.
#[must_use]
pub fn raycast(graph: &SceneGraph, roots: &[NodeId], ray: &Ray) -> Vec<Hit> {
    let mut hits: Vec<Hit> = roots
        .iter()
        .flat_map(|&root| graph.subtree(root))
        .filter(|&id| graph.node(id).visible)
        .filter_map(|id| {
            ray.intersect_aabb(&graph.world_bounds(id))
                .map(|distance| Hit { node: id, distance })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// Hover/select channel bookkeeping over raw raycasts.
///
/// The two channels are independent: hover records every outcome including
/// misses, select records matches only. A change of the select channel's
/// value resets the hover channel, so no stale highlight survives a change
/// of viewing context.
#[derive(Debug, Default)]
pub struct Picker {
    last_hovered: Option<NodeId>,
    last_selected: Option<NodeId>,
}

impl Picker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The hover channel's last resolved value.
    #[must_use]
    pub fn hovered(&self) -> Option<NodeId> {
        self.last_hovered
    }

    /// The select channel's last resolved value.
    #[must_use]
    pub fn selected(&self) -> Option<NodeId> {
        self.last_selected
    }

    /// Overwrite the select channel (used when a selection is cleared from
    /// outside the picking path). A changed value resets the hover channel.
    pub fn set_selected(&mut self, node: Option<NodeId>) {
        if node != self.last_selected {
            self.last_selected = node;
            self.last_hovered = None;
        }
    }

    /// Resolve a pointer-move against the scene on the hover channel.
    pub fn pick_hover(
        &mut self,
        graph: &SceneGraph,
        roots: &[NodeId],
        ray: &Ray,
        filter: impl Fn(&SceneGraph, NodeId) -> bool,
    ) -> PickResult {
        let matched = first_match(graph, roots, ray, filter);
        let previous = self.last_hovered;
        self.last_hovered = matched;
        PickResult {
            matched,
            repeat: matched == previous,
            previous,
        }
    }

    /// Resolve a click against the scene on the select channel. Misses do
    /// not clear an existing selection.
    pub fn pick_select(
        &mut self,
        graph: &SceneGraph,
        roots: &[NodeId],
        ray: &Ray,
        filter: impl Fn(&SceneGraph, NodeId) -> bool,
    ) -> PickResult {
        let matched = first_match(graph, roots, ray, filter);
        let previous = self.last_selected;
        if matched.is_some() && matched != previous {
            self.last_selected = matched;
            self.last_hovered = None;
        }
        PickResult {
            matched,
            repeat: matched == previous,
            previous,
        }
    }
}

fn first_match(
    graph: &SceneGraph,
    roots: &[NodeId],
    ray: &Ray,
    filter: impl Fn(&SceneGraph, NodeId) -> bool,
) -> Option<NodeId> {
    raycast(graph, roots, ray)
        .into_iter()
        .map(|hit| hit.node)
        .find(|&node| filter(graph, node))
}
