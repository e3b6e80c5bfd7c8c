//! Spatial index over resource positions.
//!
//! Rebuilt once per tick and queried concurrently by the parallel entity
//! phase (read-only).

use kdtree::distance::squared_euclidean;
use kdtree::{ErrorKind as KdTreeError, KdTree};
use ndarray::Array1;

use super::resource::Resource;

/// 2D KD-tree keyed by resource index.
pub type Tree2D = KdTree<f32, usize, Vec<f32>>;

/// Pre-built KD-tree over the live resource set.
pub struct SpatialIndex {
    resources: Tree2D,
}

impl SpatialIndex {
    /// Builds the index from the current resource set.
    pub fn build(resources: &[Resource]) -> Result<Self, KdTreeError> {
        let mut tree = KdTree::with_capacity(2, resources.len().max(1));
        for (i, resource) in resources.iter().enumerate() {
            tree.add(resource.pos.to_vec(), i)?;
        }
        Ok(Self { resources: tree })
    }

    /// Returns the nearest resource to `pos` as
    /// (`distance_squared`, index), or `None` if no resources exist.
    pub fn nearest(&self, pos: &Array1<f32>) -> Option<(f32, usize)> {
        self.resources
            .nearest(&pos.to_vec(), 1, &squared_euclidean)
            .ok()
            .and_then(|hits| hits.first().map(|&(dist_sq, &idx)| (dist_sq, idx)))
    }

    /// Returns the first resource within `radius` of `pos`, as
    /// (`distance_squared`, index).
    ///
    /// Which of several equidistant resources comes first is an artifact of
    /// the query order; callers must not rely on a particular tie-break.
    pub fn first_within(&self, pos: &Array1<f32>, radius: f32) -> Option<(f32, usize)> {
        self.resources
            .within(&pos.to_vec(), radius.powi(2), &squared_euclidean)
            .ok()
            .and_then(|hits| hits.first().map(|&(dist_sq, &idx)| (dist_sq, idx)))
    }
}
