//! Ready-made [`PointMap`] implementations.
//!
//! The adapters accept any `PointMap`; these cover the common cases of indexing
//! a slice, wrapping a closure, and the identity map used to run point-based
//! algorithms with handle-based plumbing.

use super::traits::PointMap;
use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;

/// Map where every point is its own handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityMap<P>(PhantomData<fn(P) -> P>);

impl<P> IdentityMap<P> {
    /// Create an identity map
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<P> Default for IdentityMap<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Clone> PointMap for IdentityMap<P> {
    type Key = P;
    type Point = P;
    type Error = Infallible;

    fn get(&self, key: &P) -> Result<P, Infallible> {
        Ok(key.clone())
    }
}

/// Out of range index passed to a [`SliceMap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Index {index} out of range for {len} points")]
pub struct SliceMapError {
    /// The requested index
    pub index: usize,
    /// Number of points in the slice
    pub len: usize,
}

/// Map from `usize` indices into a borrowed slice of points
#[derive(Debug, Clone, Copy)]
pub struct SliceMap<'a, P> {
    points: &'a [P],
}

impl<'a, P> SliceMap<'a, P> {
    /// Create a map over `points`
    #[must_use]
    pub const fn new(points: &'a [P]) -> Self {
        Self { points }
    }

    /// Number of addressable points
    #[must_use]
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// True if no index resolves
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl<P: Clone> PointMap for SliceMap<'_, P> {
    type Key = usize;
    type Point = P;
    type Error = SliceMapError;

    fn get(&self, key: &usize) -> Result<P, SliceMapError> {
        self.points.get(*key).cloned().ok_or(SliceMapError {
            index: *key,
            len: self.points.len(),
        })
    }
}

/// Map backed by a closure `Fn(&K) -> Result<P, E>`
pub struct FnPointMap<F, K, P, E> {
    f: F,
    _signature: PhantomData<fn(&K) -> Result<P, E>>,
}

impl<F, K, P, E> FnPointMap<F, K, P, E>
where
    F: Fn(&K) -> Result<P, E>,
{
    /// Wrap a lookup closure
    pub fn new(f: F) -> Self {
        Self {
            f,
            _signature: PhantomData,
        }
    }
}

impl<F: Clone, K, P, E> Clone for FnPointMap<F, K, P, E> {
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            _signature: PhantomData,
        }
    }
}

impl<F, K, P, E> fmt::Debug for FnPointMap<F, K, P, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPointMap").finish_non_exhaustive()
    }
}

impl<F, K, P, E> PointMap for FnPointMap<F, K, P, E>
where
    F: Fn(&K) -> Result<P, E>,
    E: std::error::Error + 'static,
{
    type Key = K;
    type Point = P;
    type Error = E;

    fn get(&self, key: &K) -> Result<P, E> {
        (self.f)(key)
    }
}

/// Wrap a closure as a [`PointMap`]
pub fn fn_point_map<F, K, P, E>(f: F) -> FnPointMap<F, K, P, E>
where
    F: Fn(&K) -> Result<P, E>,
{
    FnPointMap::new(f)
}
