//! Vertex-keyed point storage.
//!
//! A minimal external point store: vertices are addressed by opaque
//! [`VertexId`] handles, and [`StoreMap`] exposes the store as a
//! [`PointMap`] for the adapters.

use super::primitives::Point3;
use super::traits::{CoordinateScalar, PointMap};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Opaque vertex handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(usize);

impl VertexId {
    /// Raw index of the handle
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Point store errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The handle does not name a stored vertex
    #[error("Unknown vertex handle: {0}")]
    UnknownVertex(VertexId),
}

/// Points keyed by vertex handles
#[derive(Debug, Clone)]
pub struct PointStore<T: CoordinateScalar> {
    points: HashMap<usize, Point3<T>>,
    next_id: usize,
}

impl<T: CoordinateScalar> Default for PointStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: CoordinateScalar> PointStore<T> {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self {
            points: HashMap::new(),
            next_id: 0,
        }
    }

    /// Store every point, returning handles in input order
    pub fn insert_all(&mut self, points: impl IntoIterator<Item = Point3<T>>) -> Vec<VertexId> {
        points.into_iter().map(|p| self.insert(p)).collect()
    }

    /// Store a point under a fresh handle
    pub fn insert(&mut self, point: Point3<T>) -> VertexId {
        let id = self.next_id;
        self.next_id += 1;
        self.points.insert(id, point);
        VertexId(id)
    }

    /// Remove a vertex. Its handle goes stale and is never reissued.
    ///
    /// # Errors
    /// Returns error if the handle is unknown
    pub fn remove(&mut self, id: VertexId) -> Result<Point3<T>, StoreError> {
        self.points
            .remove(&id.0)
            .ok_or(StoreError::UnknownVertex(id))
    }

    /// Look up a vertex position
    ///
    /// # Errors
    /// Returns error if the handle is unknown
    pub fn get(&self, id: VertexId) -> Result<Point3<T>, StoreError> {
        self.points
            .get(&id.0)
            .copied()
            .ok_or(StoreError::UnknownVertex(id))
    }

    /// Number of stored vertices
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the store holds no vertices
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Live handles in ascending order
    #[must_use]
    pub fn ids(&self) -> Vec<VertexId> {
        let mut ids: Vec<VertexId> = self.points.keys().map(|&id| VertexId(id)).collect();
        ids.sort_unstable();
        ids
    }

    /// Borrow the store as a lookup function
    #[must_use]
    pub const fn point_map(&self) -> StoreMap<'_, T> {
        StoreMap { store: self }
    }
}

/// [`PointMap`] view of a [`PointStore`]
#[derive(Debug, Clone, Copy)]
pub struct StoreMap<'a, T: CoordinateScalar> {
    store: &'a PointStore<T>,
}

impl<T: CoordinateScalar> PointMap for StoreMap<'_, T> {
    type Key = VertexId;
    type Point = Point3<T>;
    type Error = StoreError;

    fn get(&self, key: &VertexId) -> Result<Point3<T>, StoreError> {
        self.store.get(*key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_creation() {
        let store = PointStore::<f64>::new();
        assert!(store.is_empty());
        assert!(store.ids().is_empty());
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut store = PointStore::new();
        let ids = store.insert_all([Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 2.0, 3.0)]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.ids(), ids);
        assert_eq!(store.get(ids[1]), Ok(Point3::new(1.0, 2.0, 3.0)));
        let origin = store.point_map().get(&ids[0]);
        assert_eq!(origin, Ok(Point3::new(0.0, 0.0, 0.0)));
    }

    #[test]
    fn test_removed_handle_is_stale() {
        let mut store = PointStore::new();
        let a = store.insert(Point3::new(0.0, 0.0, 0.0));
        let b = store.insert(Point3::new(1.0, 0.0, 0.0));
        assert!(store.remove(a).is_ok());
        assert_eq!(store.get(a), Err(StoreError::UnknownVertex(a)));
        assert_eq!(store.remove(a), Err(StoreError::UnknownVertex(a)));

        // Fresh handles are never recycled.
        let c = store.insert(Point3::new(2.0, 0.0, 0.0));
        assert_ne!(c, a);
        assert_eq!(store.ids(), vec![b, c]);
    }

    #[test]
    fn test_vertex_id_display() {
        let mut store = PointStore::new();
        let id = store.insert(Point3::new(0.0, 0.0, 0.0));
        assert_eq!(id.to_string(), "v0");
        assert_eq!(
            StoreError::UnknownVertex(id).to_string(),
            "Unknown vertex handle: v0"
        );
    }
}
