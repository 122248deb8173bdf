//! Axis-aligned bounding box in f32 world space.

use glam::Vec3;

/// Axis-aligned bounding box.
///
/// Invariant for non-empty boxes: `min.x <= max.x`, `min.y <= max.y`,
/// `min.z <= max.z`. The empty box inverts the invariant (`min` = +inf,
/// `max` = -inf) so that growing it by any point yields that point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// The empty box. Growing it by a point yields a degenerate box at
    /// that point.
    pub const EMPTY: Self = Self {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    /// Create an AABB from two corners. Automatically sorts components so
    /// that min <= max on every axis.
    #[must_use]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest box enclosing all given points. Empty input yields
    /// [`Aabb::EMPTY`].
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut bounds = Self::EMPTY;
        for p in points {
            bounds.grow(p);
        }
        bounds
    }

    /// Expand the box to enclose `point`.
    pub fn grow(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Smallest box enclosing both self and other.
    #[must_use]
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// True if no point has been added yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Center point. Meaningless for the empty box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Extent along each axis. Zero for the empty box.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }

    /// True if the point lies inside or on the boundary.
    #[must_use]
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// True if the box is empty or flat on at least one axis.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.is_empty()
            || self.min.x == self.max.x
            || self.min.y == self.max.y
            || self.min.z == self.max.z
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}
