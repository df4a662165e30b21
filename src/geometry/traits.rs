//! Core geometry traits for predicate and construction bundles.
//!
//! Every operation of a bundle is a small functor value implementing one of the
//! arity traits below. Point-based kernels and handle-based adapters implement
//! the same bundle traits, so an algorithm written against [`HullTraits3`] runs
//! unchanged over raw points or over vertex handles.

use super::primitives::{Orientation, Projection};
use std::cmp::Ordering;

/// Core numeric trait for coordinates in geometric calculations
pub trait CoordinateScalar:
    Clone + Copy + PartialEq + PartialOrd + std::fmt::Debug + 'static + num_traits::Float
{
}

impl<T> CoordinateScalar for T where
    T: Clone + Copy + PartialEq + PartialOrd + std::fmt::Debug + 'static + num_traits::Float
{
}

/// Operation callable with two values of `A`
pub trait Functor2<A> {
    /// Result of the operation
    type Output;
    /// Failure raised by the operation
    type Error;

    /// Invoke the operation
    ///
    /// # Errors
    /// Returns the operation's failure unchanged
    fn call(&self, a: &A, b: &A) -> Result<Self::Output, Self::Error>;
}

/// Operation callable with three values of `A`
pub trait Functor3<A> {
    /// Result of the operation
    type Output;
    /// Failure raised by the operation
    type Error;

    /// Invoke the operation
    ///
    /// # Errors
    /// Returns the operation's failure unchanged
    fn call(&self, a: &A, b: &A, c: &A) -> Result<Self::Output, Self::Error>;
}

/// Operation callable with four values of `A`
pub trait Functor4<A> {
    /// Result of the operation
    type Output;
    /// Failure raised by the operation
    type Error;

    /// Invoke the operation
    ///
    /// # Errors
    /// Returns the operation's failure unchanged
    fn call(&self, a: &A, b: &A, c: &A, d: &A) -> Result<Self::Output, Self::Error>;
}

/// Operation taking a separator `S` (plane or line) and one value of `A`
pub trait SeparatorFunctor1<S, A> {
    /// Result of the operation
    type Output;
    /// Failure raised by the operation
    type Error;

    /// Invoke the operation
    ///
    /// # Errors
    /// Returns the operation's failure unchanged
    fn call(&self, separator: &S, a: &A) -> Result<Self::Output, Self::Error>;
}

/// Operation taking a separator `S` (plane or line) and two values of `A`
pub trait SeparatorFunctor2<S, A> {
    /// Result of the operation
    type Output;
    /// Failure raised by the operation
    type Error;

    /// Invoke the operation
    ///
    /// # Errors
    /// Returns the operation's failure unchanged
    fn call(&self, separator: &S, a: &A, b: &A) -> Result<Self::Output, Self::Error>;
}

/// Lookup from an opaque key to a point value.
///
/// Implementations must be deterministic and free of side effects: the
/// adapters call `get` once per handle argument and assume the answer does not
/// depend on when or how often they ask.
pub trait PointMap {
    /// Handle type accepted by the map
    type Key;
    /// Point type produced by the map
    type Point;
    /// Failure raised for keys the map cannot resolve
    type Error: std::error::Error + 'static;

    /// Resolve a key to its point
    ///
    /// # Errors
    /// Returns error if the key has no associated point
    fn get(&self, key: &Self::Key) -> Result<Self::Point, Self::Error>;
}

impl<M: PointMap + ?Sized> PointMap for &M {
    type Key = M::Key;
    type Point = M::Point;
    type Error = M::Error;

    fn get(&self, key: &Self::Key) -> Result<Self::Point, Self::Error> {
        (**self).get(key)
    }
}

/// Predicates and constructions over a 2D projection of 3D points
pub trait ProjectionTraits2 {
    /// Point type the operations accept
    type Point: Clone;
    /// Failure raised by the operations
    type Error: std::error::Error + 'static;

    /// Projected equality
    type Equal2: Functor2<Self::Point, Output = bool, Error = Self::Error>;
    /// Lexicographic `(u, v)` ordering
    type LessXy2: Functor2<Self::Point, Output = bool, Error = Self::Error>;
    /// Lexicographic `(v, u)` ordering
    type LessYx2: Functor2<Self::Point, Output = bool, Error = Self::Error>;
    /// `(p, q, r, s)`: is `r` at smaller signed distance from line `pq` than `s`
    type LessSignedDistanceToLine2: Functor4<Self::Point, Output = bool, Error = Self::Error>;
    /// `(p, q, r)` make a strict left turn
    type LeftTurn2: Functor3<Self::Point, Output = bool, Error = Self::Error>;
    /// `(e, p, q)`: is `p` before `q` in counterclockwise order around `e`
    type LessRotateCcw2: Functor3<Self::Point, Output = bool, Error = Self::Error>;
    /// Orientation of `(p, q, r)`
    type Orientation2: Functor3<Self::Point, Output = Orientation, Error = Self::Error>;

    /// Axis pair this bundle projects onto
    fn projection(&self) -> Projection;

    /// Projected equality functor
    fn equal_2_object(&self) -> Self::Equal2;
    /// `(u, v)` ordering functor
    fn less_xy_2_object(&self) -> Self::LessXy2;
    /// `(v, u)` ordering functor
    fn less_yx_2_object(&self) -> Self::LessYx2;
    /// Signed distance to line comparison functor
    fn less_signed_distance_to_line_2_object(&self) -> Self::LessSignedDistanceToLine2;
    /// Left turn functor
    fn left_turn_2_object(&self) -> Self::LeftTurn2;
    /// Counterclockwise rotation ordering functor
    fn less_rotate_ccw_2_object(&self) -> Self::LessRotateCcw2;
    /// Orientation functor
    fn orientation_2_object(&self) -> Self::Orientation2;
}

/// Predicates and constructions needed by 3D convex hull algorithms
pub trait HullTraits3 {
    /// Point type the operations accept
    type Point: Clone;
    /// Plane type produced by [`Self::ConstructPlane3`]
    type Plane: Clone;
    /// Failure raised by the operations
    type Error: std::error::Error + 'static;

    /// Point equality
    type Equal3: Functor2<Self::Point, Output = bool, Error = Self::Error>;
    /// Three points on a common line
    type Collinear3: Functor3<Self::Point, Output = bool, Error = Self::Error>;
    /// Four points on a common plane
    type Coplanar3: Functor4<Self::Point, Output = bool, Error = Self::Error>;
    /// `(p, q, r)`: is `q` closer to `p` than `r`
    type LessDistanceToPoint3: Functor3<Self::Point, Output = bool, Error = Self::Error>;
    /// `(h, p, q)`: is `p` at smaller signed distance from `h` than `q`
    type LessSignedDistanceToPlane3: SeparatorFunctor2<
            Self::Plane,
            Self::Point,
            Output = bool,
            Error = Self::Error,
        >;
    /// Compare x coordinates
    type CompareX3: Functor2<Self::Point, Output = Ordering, Error = Self::Error>;
    /// Compare y coordinates
    type CompareY3: Functor2<Self::Point, Output = Ordering, Error = Self::Error>;
    /// Compare z coordinates
    type CompareZ3: Functor2<Self::Point, Output = Ordering, Error = Self::Error>;
    /// Oriented plane through three points
    type ConstructPlane3: Functor3<Self::Point, Output = Self::Plane, Error = Self::Error>;
    /// `(h, p)`: is `p` strictly on the positive side of `h`
    type HasOnPositiveSide3: SeparatorFunctor1<
            Self::Plane,
            Self::Point,
            Output = bool,
            Error = Self::Error,
        >;

    /// Projection dropping z
    type TraitsXy3: ProjectionTraits2<Point = Self::Point, Error = Self::Error>;
    /// Projection dropping x
    type TraitsYz3: ProjectionTraits2<Point = Self::Point, Error = Self::Error>;
    /// Projection dropping y
    type TraitsXz3: ProjectionTraits2<Point = Self::Point, Error = Self::Error>;

    /// Equality functor
    fn equal_3_object(&self) -> Self::Equal3;
    /// Collinearity functor
    fn collinear_3_object(&self) -> Self::Collinear3;
    /// Coplanarity functor
    fn coplanar_3_object(&self) -> Self::Coplanar3;
    /// Distance comparison functor
    fn less_distance_to_point_3_object(&self) -> Self::LessDistanceToPoint3;
    /// Signed plane distance comparison functor
    fn less_signed_distance_to_plane_3_object(&self) -> Self::LessSignedDistanceToPlane3;
    /// X comparison functor
    fn compare_x_3_object(&self) -> Self::CompareX3;
    /// Y comparison functor
    fn compare_y_3_object(&self) -> Self::CompareY3;
    /// Z comparison functor
    fn compare_z_3_object(&self) -> Self::CompareZ3;
    /// Plane construction functor
    fn construct_plane_3_object(&self) -> Self::ConstructPlane3;
    /// Plane side functor
    fn has_on_positive_side_3_object(&self) -> Self::HasOnPositiveSide3;

    /// Bundle for the xy projection
    fn construct_traits_xy_3_object(&self) -> Self::TraitsXy3;
    /// Bundle for the yz projection
    fn construct_traits_yz_3_object(&self) -> Self::TraitsYz3;
    /// Bundle for the xz projection
    fn construct_traits_xz_3_object(&self) -> Self::TraitsXz3;
}
