//! Spatial Index Module
//!
//! R-tree over node bounds in graph space. Box selection, point hit testing
//! and visible-node culling query it instead of scanning every node.

use crate::types::{Bounds, ElementId, Rect};
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

/// A node's bounding box as stored in the tree.
#[derive(Debug, Clone)]
pub struct SpatialEntry {
    pub node_id: ElementId,
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl SpatialEntry {
    pub fn new(node_id: ElementId, rect: Rect) -> Self {
        Self {
            node_id,
            min_x: rect.x,
            min_y: rect.y,
            max_x: rect.x + rect.width,
            max_y: rect.y + rect.height,
        }
    }

    #[inline]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_x, self.min_y], [self.max_x, self.max_y])
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.node_id == other.node_id
    }
}

/// Spatial index for nodes using an R-tree.
#[derive(Debug)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<ElementId, SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            entries: HashMap::new(),
        }
    }

    /// Insert or move a node's entry.
    pub fn insert(&mut self, node_id: ElementId, rect: Rect) {
        if let Some(old_entry) = self.entries.remove(&node_id) {
            self.tree.remove(&old_entry);
        }

        let entry = SpatialEntry::new(node_id.clone(), rect);
        self.tree.insert(entry.clone());
        self.entries.insert(node_id, entry);
    }

    pub fn remove(&mut self, node_id: &str) -> bool {
        if let Some(entry) = self.entries.remove(node_id) {
            self.tree.remove(&entry);
            true
        } else {
            false
        }
    }

    /// All nodes whose bounds contain the point.
    pub fn query_point(&self, x: f64, y: f64) -> Vec<ElementId> {
        let point_envelope = AABB::from_point([x, y]);

        self.tree
            .locate_in_envelope_intersecting(&point_envelope)
            .filter(|entry| entry.contains_point(x, y))
            .map(|entry| entry.node_id.clone())
            .collect()
    }

    /// All nodes whose bounds intersect the box; touching edges count.
    pub fn query_box(&self, bounds: &Bounds) -> Vec<ElementId> {
        let envelope = AABB::from_corners(
            [bounds.x.min(bounds.x2), bounds.y.min(bounds.y2)],
            [bounds.x.max(bounds.x2), bounds.y.max(bounds.y2)],
        );

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.node_id.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.entries.clear();
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
