//! Vertex-to-point traits adapter.
//!
//! [`VertexToPointTraits`] wraps a point-based [`HullTraits3`] bundle and a
//! [`PointMap`], and is itself a [`HullTraits3`] bundle whose points are the
//! map's handles. Hull algorithms run over it unchanged.

use super::forward::forward_functors;
use super::projection::ProjectionAdapter;
use crate::errors::AdapterError;
use crate::geometry::traits::{HullTraits3, PointMap};

/// Handle-based view of a point-based hull traits bundle
#[derive(Debug, Clone)]
pub struct VertexToPointTraits<K, M> {
    map: M,
    base: K,
}

/// Wrap `base` so that every operation accepts handles resolved through `map`.
///
/// # Example
///
/// ```
/// use vertex_point_traits::prelude::*;
///
/// let mut store = PointStore::new();
/// let ids = store.insert_all([
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
/// ]);
/// let traits = make_adapter(store.point_map(), Cartesian::new());
/// let collinear = traits.collinear_3_object();
/// assert_eq!(Functor3::call(&collinear, &ids[0], &ids[1], &ids[2]), Ok(true));
/// ```
pub const fn make_adapter<K, M>(map: M, base: K) -> VertexToPointTraits<K, M>
where
    K: HullTraits3,
    M: PointMap<Point = K::Point> + Clone,
{
    VertexToPointTraits::new(map, base)
}

impl<K, M> VertexToPointTraits<K, M> {
    /// Create an adapter from a lookup function and a base bundle
    pub const fn new(map: M, base: K) -> Self {
        Self { map, base }
    }

    /// The lookup function
    #[must_use]
    pub const fn map(&self) -> &M {
        &self.map
    }

    /// The wrapped base bundle
    #[must_use]
    pub const fn base(&self) -> &K {
        &self.base
    }

    /// Take the adapter apart
    pub fn into_parts(self) -> (M, K) {
        (self.map, self.base)
    }
}

impl<K, M: PointMap> VertexToPointTraits<K, M> {
    /// Point value behind a handle, straight from the lookup function
    ///
    /// # Errors
    /// Returns the lookup function's failure unchanged
    pub fn resolve(&self, handle: &M::Key) -> Result<M::Point, M::Error> {
        self.map.get(handle)
    }
}

impl<K, M> HullTraits3 for VertexToPointTraits<K, M>
where
    K: HullTraits3,
    M: PointMap<Point = K::Point> + Clone,
    M::Key: Clone,
{
    type Point = M::Key;
    type Plane = K::Plane;
    type Error = AdapterError<M::Error, K::Error>;

    forward_functors! { K, M;
        Equal3 => equal_3_object,
        Collinear3 => collinear_3_object,
        Coplanar3 => coplanar_3_object,
        LessDistanceToPoint3 => less_distance_to_point_3_object,
        LessSignedDistanceToPlane3 => less_signed_distance_to_plane_3_object,
        CompareX3 => compare_x_3_object,
        CompareY3 => compare_y_3_object,
        CompareZ3 => compare_z_3_object,
        ConstructPlane3 => construct_plane_3_object,
        HasOnPositiveSide3 => has_on_positive_side_3_object,
    }

    type TraitsXy3 = ProjectionAdapter<K::TraitsXy3, M>;
    type TraitsYz3 = ProjectionAdapter<K::TraitsYz3, M>;
    type TraitsXz3 = ProjectionAdapter<K::TraitsXz3, M>;

    fn construct_traits_xy_3_object(&self) -> Self::TraitsXy3 {
        ProjectionAdapter::new(self.map.clone(), self.base.construct_traits_xy_3_object())
    }

    fn construct_traits_yz_3_object(&self) -> Self::TraitsYz3 {
        ProjectionAdapter::new(self.map.clone(), self.base.construct_traits_yz_3_object())
    }

    fn construct_traits_xz_3_object(&self) -> Self::TraitsXz3 {
        ProjectionAdapter::new(self.map.clone(), self.base.construct_traits_xz_3_object())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::registry::{OperationFamily, OperationKind};
    use crate::geometry::backends::cartesian::{Cartesian, KernelError};
    use crate::geometry::backends::mock::RecordingKernel;
    use crate::geometry::point_store::{PointStore, StoreError, VertexId};
    use crate::geometry::primitives::{Orientation, Plane3, Point3};
    use crate::geometry::traits::{
        Functor2, Functor3, Functor4, ProjectionTraits2, SeparatorFunctor1, SeparatorFunctor2,
    };

    fn sample_store() -> (PointStore<f64>, Vec<VertexId>) {
        let mut store = PointStore::new();
        let ids = store.insert_all([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.3, 0.2, 1.5),
            Point3::new(-1.0, 4.0, -2.0),
        ]);
        (store, ids)
    }

    #[test]
    fn test_collinear_handles() {
        let (store, ids) = sample_store();
        let kernel = Cartesian::new();
        let traits = make_adapter(store.point_map(), kernel);

        let adapted = Functor3::call(&traits.collinear_3_object(), &ids[0], &ids[1], &ids[2]);
        let direct = Functor3::call(
            &kernel.collinear_3_object(),
            &store.get(ids[0]).unwrap(),
            &store.get(ids[1]).unwrap(),
            &store.get(ids[2]).unwrap(),
        );
        assert_eq!(adapted, Ok(true));
        assert_eq!(direct, Ok(true));
    }

    #[test]
    fn test_every_operation_is_transparent() {
        let (store, ids) = sample_store();
        let kernel = Cartesian::with_tolerance(1e-12);
        let traits = make_adapter(store.point_map(), kernel);
        let pt = |id: &VertexId| store.get(*id).unwrap();

        let equal = (traits.equal_3_object(), kernel.equal_3_object());
        let x = (traits.compare_x_3_object(), kernel.compare_x_3_object());
        let y = (traits.compare_y_3_object(), kernel.compare_y_3_object());
        let z = (traits.compare_z_3_object(), kernel.compare_z_3_object());
        let collinear = (traits.collinear_3_object(), kernel.collinear_3_object());
        let closer = (
            traits.less_distance_to_point_3_object(),
            kernel.less_distance_to_point_3_object(),
        );
        let plane = (
            traits.construct_plane_3_object(),
            kernel.construct_plane_3_object(),
        );

        for a in &ids {
            for b in &ids {
                let (pa, pb) = (pt(a), pt(b));
                assert_eq!(
                    Functor2::call(&equal.0, a, b).unwrap(),
                    Functor2::call(&equal.1, &pa, &pb).unwrap()
                );
                assert_eq!(
                    Functor2::call(&x.0, a, b).unwrap(),
                    Functor2::call(&x.1, &pa, &pb).unwrap()
                );
                assert_eq!(
                    Functor2::call(&y.0, a, b).unwrap(),
                    Functor2::call(&y.1, &pa, &pb).unwrap()
                );
                assert_eq!(
                    Functor2::call(&z.0, a, b).unwrap(),
                    Functor2::call(&z.1, &pa, &pb).unwrap()
                );
                for c in &ids {
                    let pc = pt(c);
                    assert_eq!(
                        Functor3::call(&collinear.0, a, b, c).unwrap(),
                        Functor3::call(&collinear.1, &pa, &pb, &pc).unwrap()
                    );
                    assert_eq!(
                        Functor3::call(&closer.0, a, b, c).unwrap(),
                        Functor3::call(&closer.1, &pa, &pb, &pc).unwrap()
                    );
                    let adapted = Functor3::call(&plane.0, a, b, c);
                    assert_eq!(
                        adapted.map_err(|e| e.as_predicate().cloned()),
                        Functor3::call(&plane.1, &pa, &pb, &pc).map_err(Some)
                    );
                }
            }
        }

        let construct = kernel.construct_plane_3_object();
        let (p0, p1, p3) = (pt(&ids[0]), pt(&ids[1]), pt(&ids[3]));
        let plane = Functor3::call(&construct, &p0, &p1, &p3).unwrap();
        let side = (
            traits.has_on_positive_side_3_object(),
            kernel.has_on_positive_side_3_object(),
        );
        let less = (
            traits.less_signed_distance_to_plane_3_object(),
            kernel.less_signed_distance_to_plane_3_object(),
        );
        for a in &ids {
            assert_eq!(
                SeparatorFunctor1::call(&side.0, &plane, a).unwrap(),
                SeparatorFunctor1::call(&side.1, &plane, &pt(a)).unwrap()
            );
            for b in &ids {
                assert_eq!(
                    SeparatorFunctor2::call(&less.0, &plane, a, b).unwrap(),
                    SeparatorFunctor2::call(&less.1, &plane, &pt(a), &pt(b)).unwrap()
                );
            }
        }

        let coplanar = traits.coplanar_3_object();
        let flat = Functor4::call(&coplanar, &ids[0], &ids[1], &ids[2], &ids[3]);
        assert_eq!(flat, Ok(true));
        let lifted = Functor4::call(&coplanar, &ids[0], &ids[1], &ids[3], &ids[4]);
        assert_eq!(lifted, Ok(false));
    }

    #[test]
    fn test_resolve_matches_lookup() {
        let (store, ids) = sample_store();
        let traits = make_adapter(store.point_map(), Cartesian::new());
        for id in &ids {
            assert_eq!(traits.resolve(id), store.get(*id));
        }
    }

    #[test]
    fn test_lookup_failure_skips_base() {
        let (mut store, ids) = sample_store();
        store.remove(ids[1]).unwrap();

        let kernel = RecordingKernel::new(Cartesian::<f64>::new());
        let traits = make_adapter(store.point_map(), kernel.clone());

        let result = Functor3::call(&traits.collinear_3_object(), &ids[0], &ids[1], &ids[2]);
        let stale = Err(AdapterError::Lookup(StoreError::UnknownVertex(ids[1])));
        assert_eq!(result, stale);
        assert_eq!(kernel.calls(), 0);

        // A resolvable call reaches the base exactly once.
        let result = Functor2::call(&traits.equal_3_object(), &ids[0], &ids[2]);
        assert_eq!(result, Ok(false));
        assert_eq!(kernel.calls(), 1);
    }

    #[test]
    fn test_lookup_failure_skips_base_for_every_shape() {
        let (mut store, ids) = sample_store();
        store.remove(ids[1]).unwrap();
        let stale = Err(AdapterError::Lookup(StoreError::UnknownVertex(ids[1])));

        let kernel = RecordingKernel::new(Cartesian::<f64>::new());
        let traits = make_adapter(store.point_map(), kernel.clone());
        let plane = Plane3::new(0.0, 0.0, 1.0, 0.0);

        let side = traits.has_on_positive_side_3_object();
        assert_eq!(SeparatorFunctor1::call(&side, &plane, &ids[1]), stale);
        let less = traits.less_signed_distance_to_plane_3_object();
        let first = SeparatorFunctor2::call(&less, &plane, &ids[0], &ids[1]);
        assert_eq!(first, stale);
        let second = SeparatorFunctor2::call(&less, &plane, &ids[1], &ids[0]);
        assert_eq!(second, stale);

        let xy = traits.construct_traits_xy_3_object();
        let orientation = xy.orientation_2_object();
        let turn = Functor3::call(&orientation, &ids[0], &ids[2], &ids[1]);
        assert_eq!(turn.map_err(|e| e.is_lookup()), Err(true));
        let line = xy.less_signed_distance_to_line_2_object();
        let closer = Functor4::call(&line, &ids[0], &ids[2], &ids[3], &ids[1]);
        assert_eq!(closer.map_err(|e| e.is_lookup()), Err(true));
        assert_eq!(kernel.calls(), 0);

        assert_eq!(SeparatorFunctor1::call(&side, &plane, &ids[4]), Ok(true));
        assert_eq!(
            Functor3::call(&orientation, &ids[0], &ids[2], &ids[3]),
            Ok(Orientation::CounterClockwise)
        );
        assert_eq!(kernel.calls(), 2);
    }

    #[test]
    fn test_predicate_failure_is_propagated() {
        let (store, ids) = sample_store();
        let traits = make_adapter(store.point_map(), Cartesian::new());
        let construct = traits.construct_plane_3_object();
        let result = Functor3::call(&construct, &ids[0], &ids[1], &ids[2]);
        assert_eq!(
            result,
            Err(AdapterError::Predicate(KernelError::DegenerateConfiguration(
                "plane through collinear points",
            )))
        );
    }

    #[test]
    fn test_repeated_calls_agree() {
        let (store, ids) = sample_store();
        let traits = make_adapter(store.point_map(), Cartesian::new());
        let closer = traits.less_distance_to_point_3_object();
        let first = Functor3::call(&closer, &ids[0], &ids[4], &ids[5]);
        for _ in 0..10 {
            assert_eq!(Functor3::call(&closer, &ids[0], &ids[4], &ids[5]), first);
        }
    }

    #[test]
    fn test_functor_kinds_match_registry() {
        let (store, _) = sample_store();
        let traits = make_adapter(store.point_map(), Cartesian::<f64>::new());
        let kinds = [
            traits.equal_3_object().kind(),
            traits.collinear_3_object().kind(),
            traits.coplanar_3_object().kind(),
            traits.less_distance_to_point_3_object().kind(),
            traits.less_signed_distance_to_plane_3_object().kind(),
            traits.compare_x_3_object().kind(),
            traits.compare_y_3_object().kind(),
            traits.compare_z_3_object().kind(),
            traits.construct_plane_3_object().kind(),
            traits.has_on_positive_side_3_object().kind(),
        ];
        let expected: Vec<OperationKind> =
            OperationKind::in_family(OperationFamily::Hull3).collect();
        assert_eq!(kinds.to_vec(), expected);
    }

    #[test]
    fn test_shared_across_threads() {
        let (store, ids) = sample_store();
        let kernel = Cartesian::new();
        let traits = make_adapter(store.point_map(), kernel);
        let expected = Functor3::call(&traits.collinear_3_object(), &ids[0], &ids[3], &ids[4]);

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let collinear = traits.collinear_3_object();
                    for _ in 0..100 {
                        assert_eq!(
                            Functor3::call(&collinear, &ids[0], &ids[3], &ids[4]),
                            expected
                        );
                    }
                });
            }
        });
    }

    #[test]
    fn test_into_parts() {
        let (store, ids) = sample_store();
        let traits = make_adapter(store.point_map(), Cartesian::with_tolerance(0.5));
        let (map, base) = traits.into_parts();
        assert!((base.tolerance() - 0.5).abs() < f64::EPSILON);
        assert_eq!(map.get(&ids[0]), Ok(Point3::new(0.0, 0.0, 0.0)));
    }
}
