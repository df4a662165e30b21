//! Handle-based projection bundles.

use super::forward::forward_functors;
use crate::errors::AdapterError;
use crate::geometry::primitives::Projection;
use crate::geometry::traits::{PointMap, ProjectionTraits2};

/// [`ProjectionTraits2`] over handles, wrapping a point-based projection bundle.
///
/// Produced by the `construct_traits_*_3_object` accessors of
/// [`VertexToPointTraits`](super::vertex_traits::VertexToPointTraits); shares
/// the parent adapter's lookup function.
#[derive(Debug, Clone)]
pub struct ProjectionAdapter<B, M> {
    map: M,
    base: B,
}

impl<B, M> ProjectionAdapter<B, M> {
    /// Wrap a projection bundle
    pub const fn new(map: M, base: B) -> Self {
        Self { map, base }
    }

    /// The wrapped projection bundle
    #[must_use]
    pub const fn base(&self) -> &B {
        &self.base
    }
}

impl<B, M: PointMap> ProjectionAdapter<B, M> {
    /// Point value behind a handle
    ///
    /// # Errors
    /// Returns the lookup function's failure unchanged
    pub fn resolve(&self, handle: &M::Key) -> Result<M::Point, M::Error> {
        self.map.get(handle)
    }
}

impl<B, M> ProjectionTraits2 for ProjectionAdapter<B, M>
where
    B: ProjectionTraits2,
    M: PointMap<Point = B::Point> + Clone,
    M::Key: Clone,
{
    type Point = M::Key;
    type Error = AdapterError<M::Error, B::Error>;

    forward_functors! { B, M;
        Equal2 => equal_2_object,
        LessXy2 => less_xy_2_object,
        LessYx2 => less_yx_2_object,
        LessSignedDistanceToLine2 => less_signed_distance_to_line_2_object,
        LeftTurn2 => left_turn_2_object,
        LessRotateCcw2 => less_rotate_ccw_2_object,
        Orientation2 => orientation_2_object,
    }

    fn projection(&self) -> Projection {
        self.base.projection()
    }
}
