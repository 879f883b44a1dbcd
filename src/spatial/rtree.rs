//! R-tree based flower index using the rstar crate.
//!
//! Answers "which flower is under the pointer" for a finished garden:
//! - Nearest flower within a pick radius
//! - Flowers inside a rectangle (lasso selection)

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use std::fmt;

/// A flower position with the slot of its placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowerPoint {
    /// Index into the garden's placement list.
    pub slot: usize,
    pub x: f32,
    pub y: f32,
}

impl FlowerPoint {
    /// Create a point for the placement at `slot`.
    pub fn new(slot: usize, x: f32, y: f32) -> Self {
        Self { slot, x, y }
    }
}

impl RTreeObject for FlowerPoint {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PointDistance for FlowerPoint {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.x - point[0];
        let dy = self.y - point[1];
        dx * dx + dy * dy
    }
}

/// Spatial index over the flowers of one garden.
pub struct FlowerIndex {
    tree: RTree<FlowerPoint>,
}

impl fmt::Debug for FlowerIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowerIndex")
            .field("len", &self.tree.size())
            .finish()
    }
}

impl FlowerIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Bulk-load an index from `(slot, x, y)` tuples.
    pub fn from_points(points: impl IntoIterator<Item = (usize, f32, f32)>) -> Self {
        let flower_points: Vec<_> = points
            .into_iter()
            .map(|(slot, x, y)| FlowerPoint::new(slot, x, y))
            .collect();
        Self {
            tree: RTree::bulk_load(flower_points),
        }
    }

    /// Slot of the nearest flower within `max_distance`.
    pub fn nearest_within(&self, x: f32, y: f32, max_distance: f32) -> Option<usize> {
        let max_distance_sq = max_distance * max_distance;
        self.tree
            .nearest_neighbor(&[x, y])
            .filter(|point| point.distance_2(&[x, y]) <= max_distance_sq)
            .map(|point| point.slot)
    }

    /// Slots of all flowers inside a rectangle.
    pub fn in_rect(&self, min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Vec<usize> {
        let envelope = AABB::from_corners([min_x, min_y], [max_x, max_y]);
        let mut slots: Vec<usize> = self
            .tree
            .locate_in_envelope(&envelope)
            .map(|point| point.slot)
            .collect();
        slots.sort_unstable();
        slots
    }

    /// Get the number of indexed flowers.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for FlowerIndex {
    fn default() -> Self {
        Self::new()
    }
}
