//! Node storage with parent/child links and world-space queries.

use arbor_math::Aabb;
use glam::{Quat, Vec3};
use rustc_hash::FxHashMap;

/// Stable handle to a node in a [`SceneGraph`].
///
/// Ids are never reused within one graph, so a stored id stays valid for the
/// graph's lifetime and equality means "the same scene object".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

/// What a node renders as, and therefore whether it can be picked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeKind {
    /// Solid geometry. The only kind the pickers keep.
    Mesh,
    /// Line geometry (tree limbs). Intersectable but filtered out of picks.
    Line,
    /// Pure grouping node with no geometry of its own.
    #[default]
    Group,
}

/// A single scene node: local pose, pickable extents, render flags.
#[derive(Clone, Debug)]
pub struct SceneNode {
    /// Translation relative to the parent.
    pub translation: Vec3,
    /// Rotation relative to the parent (unit quaternion).
    pub rotation: Quat,
    /// Half-size of the node's local bounding box. Zero for groups.
    pub half_extents: Vec3,
    /// Geometry kind, used for pick filtering.
    pub kind: NodeKind,
    /// Material opacity, animated by fade tweens.
    pub opacity: f32,
    /// Invisible nodes are skipped by raycasts and fades toggle this flag.
    pub visible: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SceneNode {
    /// A group node at the given local pose.
    #[must_use]
    pub fn group(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation: rotation.normalize(),
            half_extents: Vec3::ZERO,
            kind: NodeKind::Group,
            opacity: 1.0,
            visible: true,
            parent: None,
            children: Vec::new(),
        }
    }

    /// A mesh node with the given local box half-extents.
    #[must_use]
    pub fn mesh(translation: Vec3, rotation: Quat, half_extents: Vec3) -> Self {
        Self {
            half_extents,
            kind: NodeKind::Mesh,
            ..Self::group(translation, rotation)
        }
    }

    /// A line node (tree limb) spanning the given local extents.
    #[must_use]
    pub fn line(translation: Vec3, half_extents: Vec3) -> Self {
        Self {
            half_extents,
            kind: NodeKind::Line,
            ..Self::group(translation, Quat::IDENTITY)
        }
    }

    /// The parent node, if any.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Direct children, in insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Flat node arena with parent/child links and label lookup.
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    labels: FxHashMap<String, NodeId>,
}

impl SceneGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node under `parent` (or as a root when `None`).
    ///
    /// # Panics
    /// Panics if `parent` is not a node of this graph.
    pub fn insert(&mut self, parent: Option<NodeId>, mut node: SceneNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        node.parent = parent;
        node.children.clear();
        self.nodes.push(node);
        if let Some(parent) = parent {
            self.nodes[parent.0 as usize].children.push(id);
        }
        id
    }

    /// Insert a node and register it under a label for later lookup.
    pub fn insert_labeled(
        &mut self,
        parent: Option<NodeId>,
        label: impl Into<String>,
        node: SceneNode,
    ) -> NodeId {
        let id = self.insert(parent, node);
        self.labels.insert(label.into(), id);
        id
    }

    /// Look up a node by label.
    #[must_use]
    pub fn find(&self, label: &str) -> Option<NodeId> {
        self.labels.get(label).copied()
    }

    /// Borrow a node.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this graph.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &SceneNode {
        &self.nodes[id.0 as usize]
    }

    /// Mutably borrow a node.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this graph.
    pub fn node_mut(&mut self, id: NodeId) -> &mut SceneNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Number of nodes in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the graph holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// World-space pose of a node, composed through its ancestor chain.
    /// Side-effect free.
    #[must_use]
    pub fn world_pose(&self, id: NodeId) -> (Vec3, Quat) {
        let node = self.node(id);
        let (parent_pos, parent_rot) = match node.parent {
            Some(parent) => self.world_pose(parent),
            None => (Vec3::ZERO, Quat::IDENTITY),
        };
        (
            parent_pos + parent_rot * node.translation,
            (parent_rot * node.rotation).normalize(),
        )
    }

    /// `id` and every node below it, depth-first.
    #[must_use]
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.node(next).children().iter().rev());
        }
        out
    }

    /// World-space box of a node's own geometry: the eight corners of its
    /// local box taken through its world pose. Empty for zero-extent nodes.
    #[must_use]
    pub fn world_bounds(&self, id: NodeId) -> Aabb {
        let node = self.node(id);
        if node.half_extents == Vec3::ZERO {
            return Aabb::EMPTY;
        }
        let (pos, rot) = self.world_pose(id);
        let he = node.half_extents;
        Aabb::from_points((0..8).map(|corner| {
            let sign = Vec3::new(
                if corner & 1 == 0 { -1.0 } else { 1.0 },
                if corner & 2 == 0 { -1.0 } else { 1.0 },
                if corner & 4 == 0 { -1.0 } else { 1.0 },
            );
            pos + rot * (he * sign)
        }))
    }

    /// World-space box enclosing the geometry of every given node and its
    /// descendants.
    #[must_use]
    pub fn bounds_of(&self, ids: &[NodeId]) -> Aabb {
        let mut bounds = Aabb::EMPTY;
        for &id in ids {
            for below in self.subtree(id) {
                bounds = bounds.union(&self.world_bounds(below));
            }
        }
        bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_world_pose_of_root_is_local_pose() {
        let mut graph = SceneGraph::new();
        let root = graph.insert(
            None,
            SceneNode::group(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY),
        );
        let (pos, rot) = graph.world_pose(root);
        assert!(approx(pos, Vec3::new(1.0, 2.0, 3.0)));
        assert!(rot.angle_between(Quat::IDENTITY) < 1e-6);
    }

    #[test]
    fn test_world_pose_composes_through_ancestors() {
        let mut graph = SceneGraph::new();
        let root = graph.insert(
            None,
            SceneNode::group(Vec3::new(10.0, 0.0, 0.0), Quat::from_rotation_y(FRAC_PI_2)),
        );
        let child = graph.insert(
            Some(root),
            SceneNode::mesh(Vec3::new(1.0, 0.0, 0.0), Quat::IDENTITY, Vec3::splat(0.5)),
        );
        let (pos, rot) = graph.world_pose(child);
        // Parent yaw rotates the child's +X offset onto -Z.
        assert!(approx(pos, Vec3::new(10.0, 0.0, -1.0)));
        assert!(rot.angle_between(Quat::from_rotation_y(FRAC_PI_2)) < 1e-5);
    }

    #[test]
    fn test_world_bounds_of_unit_mesh_at_origin() {
        let mut graph = SceneGraph::new();
        let node = graph.insert(
            None,
            SceneNode::mesh(Vec3::ZERO, Quat::IDENTITY, Vec3::splat(0.5)),
        );
        let bounds = graph.world_bounds(node);
        assert!(approx(bounds.center(), Vec3::ZERO));
        assert!(approx(bounds.size(), Vec3::ONE));
    }

    #[test]
    fn test_bounds_of_spans_offset_nodes() {
        let mut graph = SceneGraph::new();
        let offset = Vec3::new(4.0, 0.0, 3.0);
        let a = graph.insert(
            None,
            SceneNode::mesh(Vec3::ZERO, Quat::IDENTITY, Vec3::splat(0.5)),
        );
        let b = graph.insert(
            None,
            SceneNode::mesh(offset, Quat::IDENTITY, Vec3::splat(0.5)),
        );
        let bounds = graph.bounds_of(&[a, b]);
        assert!(bounds.size().x >= offset.x);
        assert!(bounds.size().z >= offset.z);
    }

    #[test]
    fn test_bounds_of_includes_descendants() {
        let mut graph = SceneGraph::new();
        let root = graph.insert(None, SceneNode::group(Vec3::ZERO, Quat::IDENTITY));
        graph.insert(
            Some(root),
            SceneNode::mesh(Vec3::new(5.0, 0.0, 0.0), Quat::IDENTITY, Vec3::splat(0.5)),
        );
        let bounds = graph.bounds_of(&[root]);
        assert!(bounds.contains_point(Vec3::new(5.0, 0.0, 0.0)));
    }

    #[test]
    fn test_rotated_mesh_grows_world_box() {
        let mut graph = SceneGraph::new();
        // A flat slab yawed 45° covers more ground in x and z.
        let node = graph.insert(
            None,
            SceneNode::mesh(
                Vec3::ZERO,
                Quat::from_rotation_y(FRAC_PI_2 / 2.0),
                Vec3::new(1.0, 0.1, 0.1),
            ),
        );
        let size = graph.world_bounds(node).size();
        assert!(size.x < 2.0 && size.x > 1.0);
        assert!(size.z > 1.0);
    }

    #[test]
    fn test_subtree_is_depth_first_and_complete() {
        let mut graph = SceneGraph::new();
        let root = graph.insert(None, SceneNode::group(Vec3::ZERO, Quat::IDENTITY));
        let a = graph.insert(Some(root), SceneNode::group(Vec3::ZERO, Quat::IDENTITY));
        let b = graph.insert(Some(root), SceneNode::group(Vec3::ZERO, Quat::IDENTITY));
        let a1 = graph.insert(Some(a), SceneNode::group(Vec3::ZERO, Quat::IDENTITY));
        assert_eq!(graph.subtree(root), vec![root, a, a1, b]);
    }

    #[test]
    fn test_find_by_label() {
        let mut graph = SceneGraph::new();
        let id = graph.insert_labeled(
            None,
            "root/left",
            SceneNode::mesh(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE),
        );
        assert_eq!(graph.find("root/left"), Some(id));
        assert_eq!(graph.find("root/right"), None);
    }
}
