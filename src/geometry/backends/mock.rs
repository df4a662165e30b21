//! Mock geometry backend for testing.
//!
//! [`RecordingKernel`] wraps any bundle and counts how many base operations
//! are actually invoked, so tests can check that a failed handle lookup never
//! reaches the base.

use crate::geometry::primitives::Projection;
use crate::geometry::traits::{
    Functor2, Functor3, Functor4, HullTraits3, ProjectionTraits2, SeparatorFunctor1,
    SeparatorFunctor2,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Functor that bumps a shared counter before delegating
#[derive(Debug, Clone)]
pub struct Recorded<F> {
    inner: F,
    calls: Arc<AtomicUsize>,
}

impl<F> Recorded<F> {
    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::Relaxed);
    }
}

impl<A, F: Functor2<A>> Functor2<A> for Recorded<F> {
    type Output = F::Output;
    type Error = F::Error;

    fn call(&self, a: &A, b: &A) -> Result<Self::Output, Self::Error> {
        self.hit();
        self.inner.call(a, b)
    }
}

impl<A, F: Functor3<A>> Functor3<A> for Recorded<F> {
    type Output = F::Output;
    type Error = F::Error;

    fn call(&self, a: &A, b: &A, c: &A) -> Result<Self::Output, Self::Error> {
        self.hit();
        self.inner.call(a, b, c)
    }
}

impl<A, F: Functor4<A>> Functor4<A> for Recorded<F> {
    type Output = F::Output;
    type Error = F::Error;

    fn call(&self, a: &A, b: &A, c: &A, d: &A) -> Result<Self::Output, Self::Error> {
        self.hit();
        self.inner.call(a, b, c, d)
    }
}

impl<S, A, F: SeparatorFunctor1<S, A>> SeparatorFunctor1<S, A> for Recorded<F> {
    type Output = F::Output;
    type Error = F::Error;

    fn call(&self, separator: &S, a: &A) -> Result<Self::Output, Self::Error> {
        self.hit();
        self.inner.call(separator, a)
    }
}

impl<S, A, F: SeparatorFunctor2<S, A>> SeparatorFunctor2<S, A> for Recorded<F> {
    type Output = F::Output;
    type Error = F::Error;

    fn call(&self, separator: &S, a: &A, b: &A) -> Result<Self::Output, Self::Error> {
        self.hit();
        self.inner.call(separator, a, b)
    }
}

/// Bundle wrapper counting base operation invocations.
///
/// Clones, and the projection bundles it hands out, share one counter.
#[derive(Debug, Clone, Default)]
pub struct RecordingKernel<K> {
    inner: K,
    calls: Arc<AtomicUsize>,
}

impl<K> RecordingKernel<K> {
    /// Wrap a bundle with a fresh counter
    #[must_use]
    pub fn new(inner: K) -> Self {
        Self {
            inner,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Base operations invoked so far
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    /// Zero the counter
    pub fn reset(&self) {
        self.calls.store(0, Ordering::Relaxed);
    }

    fn record<F>(&self, inner: F) -> Recorded<F> {
        Recorded {
            inner,
            calls: Arc::clone(&self.calls),
        }
    }

    fn wrap<B>(&self, inner: B) -> RecordingKernel<B> {
        RecordingKernel {
            inner,
            calls: Arc::clone(&self.calls),
        }
    }
}

macro_rules! record_functors {
    ($($op:ident => $accessor:ident),* $(,)?) => {
        $(
            type $op = Recorded<K::$op>;

            fn $accessor(&self) -> Self::$op {
                self.record(self.inner.$accessor())
            }
        )*
    };
}

impl<K: HullTraits3> HullTraits3 for RecordingKernel<K> {
    type Point = K::Point;
    type Plane = K::Plane;
    type Error = K::Error;

    record_functors! {
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

    type TraitsXy3 = RecordingKernel<K::TraitsXy3>;
    type TraitsYz3 = RecordingKernel<K::TraitsYz3>;
    type TraitsXz3 = RecordingKernel<K::TraitsXz3>;

    fn construct_traits_xy_3_object(&self) -> Self::TraitsXy3 {
        self.wrap(self.inner.construct_traits_xy_3_object())
    }

    fn construct_traits_yz_3_object(&self) -> Self::TraitsYz3 {
        self.wrap(self.inner.construct_traits_yz_3_object())
    }

    fn construct_traits_xz_3_object(&self) -> Self::TraitsXz3 {
        self.wrap(self.inner.construct_traits_xz_3_object())
    }
}

impl<K: ProjectionTraits2> ProjectionTraits2 for RecordingKernel<K> {
    type Point = K::Point;
    type Error = K::Error;

    record_functors! {
        Equal2 => equal_2_object,
        LessXy2 => less_xy_2_object,
        LessYx2 => less_yx_2_object,
        LessSignedDistanceToLine2 => less_signed_distance_to_line_2_object,
        LeftTurn2 => left_turn_2_object,
        LessRotateCcw2 => less_rotate_ccw_2_object,
        Orientation2 => orientation_2_object,
    }

    fn projection(&self) -> Projection {
        self.inner.projection()
    }
}
