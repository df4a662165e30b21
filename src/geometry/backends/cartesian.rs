//! Cartesian floating-point kernel.
//!
//! A straightforward point-based bundle over [`Point3`] that serves as the base
//! for the handle adapters. Predicates are evaluated in plain floating point with
//! an optional distance tolerance; no exact or filtered arithmetic is attempted.
//!
//! Every zero test measures a distance. A point counts as on a line or plane
//! when it lies within `tolerance` of it, so a point strictly above a facet is
//! never collinear with one of that facet's edges.

use crate::geometry::primitives::{Orientation, Plane3, Point3, Projection};
use crate::geometry::traits::{
    CoordinateScalar, Functor2, Functor3, Functor4, HullTraits3, ProjectionTraits2,
    SeparatorFunctor1, SeparatorFunctor2,
};
use num_traits::ToPrimitive;
use std::cmp::Ordering;
use std::marker::PhantomData;

/// Cartesian kernel errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KernelError {
    /// An input coordinate is NaN or infinite
    #[error("Non-finite {axis} coordinate: {value}")]
    NonFiniteCoordinate {
        /// Axis name of the offending coordinate
        axis: &'static str,
        /// The offending value
        value: f64,
    },

    /// An input plane has a NaN or infinite coefficient
    #[error("Non-finite plane coefficient")]
    NonFinitePlane,

    /// The inputs do not determine the requested object
    #[error("Degenerate configuration: {0}")]
    DegenerateConfiguration(&'static str),
}

fn check<T: CoordinateScalar>(p: &Point3<T>) -> Result<(), KernelError> {
    if p.is_finite() {
        return Ok(());
    }
    let (axis, value) = [("x", p.x), ("y", p.y), ("z", p.z)]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
        .map_or(("x", p.x), |found| found);
    Err(KernelError::NonFiniteCoordinate {
        axis,
        value: value.to_f64().unwrap_or(f64::NAN),
    })
}

fn check_plane<T: CoordinateScalar>(plane: &Plane3<T>) -> Result<(), KernelError> {
    if plane.is_finite() {
        Ok(())
    } else {
        Err(KernelError::NonFinitePlane)
    }
}

fn cross<T: CoordinateScalar>(u: [T; 3], v: [T; 3]) -> [T; 3] {
    [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ]
}

fn dot<T: CoordinateScalar>(u: [T; 3], v: [T; 3]) -> T {
    u[0] * v[0] + u[1] * v[1] + u[2] * v[2]
}

fn norm<T: CoordinateScalar>(v: [T; 3]) -> T {
    dot(v, v).sqrt()
}

fn squared_distance<T: CoordinateScalar>(p: &Point3<T>, q: &Point3<T>) -> T {
    let d = p.sub(q);
    dot(d, d)
}

/// `r` lies within `tol` of the line through `p` and `q`
fn is_collinear<T: CoordinateScalar>(p: &Point3<T>, q: &Point3<T>, r: &Point3<T>, tol: T) -> bool {
    let n = cross(q.sub(p), r.sub(p));
    if tol == T::zero() {
        return n.iter().all(|c| *c == T::zero());
    }
    norm(n) <= tol * norm(q.sub(p))
}

fn compare<T: CoordinateScalar>(a: T, b: T) -> Ordering {
    // Inputs are checked finite before comparing.
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

macro_rules! kernel_functors {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq)]
            pub struct $name<T> {
                tolerance: T,
            }

            impl<T: Copy> $name<T> {
                /// Tolerance captured from the kernel
                #[must_use]
                pub const fn tolerance(&self) -> T {
                    self.tolerance
                }
            }
        )*
    };
}

kernel_functors! {
    /// Exact coordinate equality
    Equal3,
    /// Collinearity within tolerance
    Collinear3,
    /// Coplanarity within tolerance
    Coplanar3,
    /// Squared distance comparison
    LessDistanceToPoint3,
    /// Plane equation comparison
    LessSignedDistanceToPlane3,
    /// X comparison
    CompareX3,
    /// Y comparison
    CompareY3,
    /// Z comparison
    CompareZ3,
    /// Plane through three points
    ConstructPlane3,
    /// Strict positive side test
    HasOnPositiveSide3,
}

impl<T: CoordinateScalar> Functor2<Point3<T>> for Equal3<T> {
    type Output = bool;
    type Error = KernelError;

    fn call(&self, a: &Point3<T>, b: &Point3<T>) -> Result<bool, KernelError> {
        check(a)?;
        check(b)?;
        Ok(a == b)
    }
}

impl<T: CoordinateScalar> Functor3<Point3<T>> for Collinear3<T> {
    type Output = bool;
    type Error = KernelError;

    fn call(&self, p: &Point3<T>, q: &Point3<T>, r: &Point3<T>) -> Result<bool, KernelError> {
        check(p)?;
        check(q)?;
        check(r)?;
        Ok(is_collinear(p, q, r, self.tolerance))
    }
}

impl<T: CoordinateScalar> Functor4<Point3<T>> for Coplanar3<T> {
    type Output = bool;
    type Error = KernelError;

    fn call(
        &self,
        p: &Point3<T>,
        q: &Point3<T>,
        r: &Point3<T>,
        s: &Point3<T>,
    ) -> Result<bool, KernelError> {
        check(p)?;
        check(q)?;
        check(r)?;
        check(s)?;
        let n = cross(q.sub(p), r.sub(p));
        let det = dot(n, s.sub(p));
        if self.tolerance == T::zero() {
            return Ok(det == T::zero());
        }
        Ok(det.abs() <= self.tolerance * norm(n))
    }
}

impl<T: CoordinateScalar> Functor3<Point3<T>> for LessDistanceToPoint3<T> {
    type Output = bool;
    type Error = KernelError;

    fn call(&self, p: &Point3<T>, q: &Point3<T>, r: &Point3<T>) -> Result<bool, KernelError> {
        check(p)?;
        check(q)?;
        check(r)?;
        Ok(squared_distance(p, q) < squared_distance(p, r))
    }
}

impl<T: CoordinateScalar> SeparatorFunctor2<Plane3<T>, Point3<T>>
    for LessSignedDistanceToPlane3<T>
{
    type Output = bool;
    type Error = KernelError;

    fn call(&self, h: &Plane3<T>, p: &Point3<T>, q: &Point3<T>) -> Result<bool, KernelError> {
        check_plane(h)?;
        check(p)?;
        check(q)?;
        Ok(h.evaluate(p) < h.evaluate(q))
    }
}

impl<T: CoordinateScalar> Functor2<Point3<T>> for CompareX3<T> {
    type Output = Ordering;
    type Error = KernelError;

    fn call(&self, a: &Point3<T>, b: &Point3<T>) -> Result<Ordering, KernelError> {
        check(a)?;
        check(b)?;
        Ok(compare(a.x, b.x))
    }
}

impl<T: CoordinateScalar> Functor2<Point3<T>> for CompareY3<T> {
    type Output = Ordering;
    type Error = KernelError;

    fn call(&self, a: &Point3<T>, b: &Point3<T>) -> Result<Ordering, KernelError> {
        check(a)?;
        check(b)?;
        Ok(compare(a.y, b.y))
    }
}

impl<T: CoordinateScalar> Functor2<Point3<T>> for CompareZ3<T> {
    type Output = Ordering;
    type Error = KernelError;

    fn call(&self, a: &Point3<T>, b: &Point3<T>) -> Result<Ordering, KernelError> {
        check(a)?;
        check(b)?;
        Ok(compare(a.z, b.z))
    }
}

impl<T: CoordinateScalar> Functor3<Point3<T>> for ConstructPlane3<T> {
    type Output = Plane3<T>;
    type Error = KernelError;

    fn call(&self, p: &Point3<T>, q: &Point3<T>, r: &Point3<T>) -> Result<Plane3<T>, KernelError> {
        check(p)?;
        check(q)?;
        check(r)?;
        if is_collinear(p, q, r, self.tolerance) {
            return Err(KernelError::DegenerateConfiguration(
                "plane through collinear points",
            ));
        }
        let n = cross(q.sub(p), r.sub(p));
        let d = -dot(n, p.coords());
        Ok(Plane3::new(n[0], n[1], n[2], d))
    }
}

impl<T: CoordinateScalar> SeparatorFunctor1<Plane3<T>, Point3<T>> for HasOnPositiveSide3<T> {
    type Output = bool;
    type Error = KernelError;

    fn call(&self, h: &Plane3<T>, p: &Point3<T>) -> Result<bool, KernelError> {
        check_plane(h)?;
        check(p)?;
        Ok(h.evaluate(p) > self.tolerance * h.normal_length())
    }
}

/// Cartesian kernel with a distance tolerance for zero tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cartesian<T: CoordinateScalar> {
    tolerance: T,
}

impl<T: CoordinateScalar> Default for Cartesian<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: CoordinateScalar> Cartesian<T> {
    /// Kernel with zero tolerance
    #[must_use]
    pub fn new() -> Self {
        Self {
            tolerance: T::zero(),
        }
    }

    /// Kernel treating points within `tolerance` of a line or plane as lying on it
    #[must_use]
    pub const fn with_tolerance(tolerance: T) -> Self {
        Self { tolerance }
    }

    /// Tolerance captured by every functor of this kernel
    #[must_use]
    pub const fn tolerance(&self) -> T {
        self.tolerance
    }

    /// Projection bundle selected at runtime
    #[must_use]
    pub const fn projection_traits(&self, projection: Projection) -> CartesianProjection<T> {
        CartesianProjection::new(projection, self.tolerance)
    }
}

impl<T: CoordinateScalar> HullTraits3 for Cartesian<T> {
    type Point = Point3<T>;
    type Plane = Plane3<T>;
    type Error = KernelError;

    type Equal3 = Equal3<T>;
    type Collinear3 = Collinear3<T>;
    type Coplanar3 = Coplanar3<T>;
    type LessDistanceToPoint3 = LessDistanceToPoint3<T>;
    type LessSignedDistanceToPlane3 = LessSignedDistanceToPlane3<T>;
    type CompareX3 = CompareX3<T>;
    type CompareY3 = CompareY3<T>;
    type CompareZ3 = CompareZ3<T>;
    type ConstructPlane3 = ConstructPlane3<T>;
    type HasOnPositiveSide3 = HasOnPositiveSide3<T>;

    type TraitsXy3 = CartesianProjection<T>;
    type TraitsYz3 = CartesianProjection<T>;
    type TraitsXz3 = CartesianProjection<T>;

    fn equal_3_object(&self) -> Self::Equal3 {
        Equal3 {
            tolerance: self.tolerance,
        }
    }

    fn collinear_3_object(&self) -> Self::Collinear3 {
        Collinear3 {
            tolerance: self.tolerance,
        }
    }

    fn coplanar_3_object(&self) -> Self::Coplanar3 {
        Coplanar3 {
            tolerance: self.tolerance,
        }
    }

    fn less_distance_to_point_3_object(&self) -> Self::LessDistanceToPoint3 {
        LessDistanceToPoint3 {
            tolerance: self.tolerance,
        }
    }

    fn less_signed_distance_to_plane_3_object(&self) -> Self::LessSignedDistanceToPlane3 {
        LessSignedDistanceToPlane3 {
            tolerance: self.tolerance,
        }
    }

    fn compare_x_3_object(&self) -> Self::CompareX3 {
        CompareX3 {
            tolerance: self.tolerance,
        }
    }

    fn compare_y_3_object(&self) -> Self::CompareY3 {
        CompareY3 {
            tolerance: self.tolerance,
        }
    }

    fn compare_z_3_object(&self) -> Self::CompareZ3 {
        CompareZ3 {
            tolerance: self.tolerance,
        }
    }

    fn construct_plane_3_object(&self) -> Self::ConstructPlane3 {
        ConstructPlane3 {
            tolerance: self.tolerance,
        }
    }

    fn has_on_positive_side_3_object(&self) -> Self::HasOnPositiveSide3 {
        HasOnPositiveSide3 {
            tolerance: self.tolerance,
        }
    }

    fn construct_traits_xy_3_object(&self) -> Self::TraitsXy3 {
        self.projection_traits(Projection::Xy)
    }

    fn construct_traits_yz_3_object(&self) -> Self::TraitsYz3 {
        self.projection_traits(Projection::Yz)
    }

    fn construct_traits_xz_3_object(&self) -> Self::TraitsXz3 {
        self.projection_traits(Projection::Xz)
    }
}

/// Projected 2D predicates over 3D Cartesian points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartesianProjection<T: CoordinateScalar> {
    projection: Projection,
    tolerance: T,
}

impl<T: CoordinateScalar> CartesianProjection<T> {
    /// Create a projection bundle
    #[must_use]
    pub const fn new(projection: Projection, tolerance: T) -> Self {
        Self {
            projection,
            tolerance,
        }
    }

    const fn functor<Tag>(&self) -> Projected<T, Tag> {
        Projected {
            projection: self.projection,
            tolerance: self.tolerance,
            _tag: PhantomData,
        }
    }
}

/// A projected functor; `Tag` selects the operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected<T, Tag> {
    projection: Projection,
    tolerance: T,
    _tag: PhantomData<Tag>,
}

impl<T: CoordinateScalar, Tag> Projected<T, Tag> {
    fn uv(&self, p: &Point3<T>) -> Result<(T, T), KernelError> {
        check(p)?;
        Ok(self.projection.project(p))
    }

    /// Twice the signed area of the projected triangle `(p, q, r)`
    fn area(&self, p: &Point3<T>, q: &Point3<T>, r: &Point3<T>) -> Result<T, KernelError> {
        let (pu, pv) = self.uv(p)?;
        let (qu, qv) = self.uv(q)?;
        let (ru, rv) = self.uv(r)?;
        Ok((qu - pu) * (rv - pv) - (qv - pv) * (ru - pu))
    }

    /// Orientation of `r` against the directed line `p q`, zero within `tolerance` of it
    fn orientation(
        &self,
        p: &Point3<T>,
        q: &Point3<T>,
        r: &Point3<T>,
    ) -> Result<Orientation, KernelError> {
        let area = self.area(p, q, r)?;
        let (pu, pv) = self.uv(p)?;
        let (qu, qv) = self.uv(q)?;
        let scale = self.tolerance * (qu - pu).hypot(qv - pv);
        Ok(if area > scale {
            Orientation::CounterClockwise
        } else if area < -scale {
            Orientation::Clockwise
        } else {
            Orientation::Collinear
        })
    }
}

/// Operation tags for [`Projected`]
pub mod tags {
    /// Projected equality
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Equal2 {}
    /// `(u, v)` ordering
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum LessXy2 {}
    /// `(v, u)` ordering
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum LessYx2 {}
    /// Signed distance to line comparison
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum LessSignedDistanceToLine2 {}
    /// Left turn
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum LeftTurn2 {}
    /// Counterclockwise rotation ordering
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum LessRotateCcw2 {}
    /// Orientation
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Orientation2 {}
}

impl<T: CoordinateScalar> Functor2<Point3<T>> for Projected<T, tags::Equal2> {
    type Output = bool;
    type Error = KernelError;

    fn call(&self, a: &Point3<T>, b: &Point3<T>) -> Result<bool, KernelError> {
        Ok(self.uv(a)? == self.uv(b)?)
    }
}

impl<T: CoordinateScalar> Functor2<Point3<T>> for Projected<T, tags::LessXy2> {
    type Output = bool;
    type Error = KernelError;

    fn call(&self, a: &Point3<T>, b: &Point3<T>) -> Result<bool, KernelError> {
        let (au, av) = self.uv(a)?;
        let (bu, bv) = self.uv(b)?;
        Ok(compare(au, bu).then(compare(av, bv)) == Ordering::Less)
    }
}

impl<T: CoordinateScalar> Functor2<Point3<T>> for Projected<T, tags::LessYx2> {
    type Output = bool;
    type Error = KernelError;

    fn call(&self, a: &Point3<T>, b: &Point3<T>) -> Result<bool, KernelError> {
        let (au, av) = self.uv(a)?;
        let (bu, bv) = self.uv(b)?;
        Ok(compare(av, bv).then(compare(au, bu)) == Ordering::Less)
    }
}

impl<T: CoordinateScalar> Functor4<Point3<T>> for Projected<T, tags::LessSignedDistanceToLine2> {
    type Output = bool;
    type Error = KernelError;

    fn call(
        &self,
        p: &Point3<T>,
        q: &Point3<T>,
        r: &Point3<T>,
        s: &Point3<T>,
    ) -> Result<bool, KernelError> {
        if self.uv(p)? == self.uv(q)? {
            return Err(KernelError::DegenerateConfiguration(
                "line through coincident points",
            ));
        }
        Ok(self.area(p, q, r)? < self.area(p, q, s)?)
    }
}

impl<T: CoordinateScalar> Functor3<Point3<T>> for Projected<T, tags::LeftTurn2> {
    type Output = bool;
    type Error = KernelError;

    fn call(&self, p: &Point3<T>, q: &Point3<T>, r: &Point3<T>) -> Result<bool, KernelError> {
        Ok(self.orientation(p, q, r)? == Orientation::CounterClockwise)
    }
}

impl<T: CoordinateScalar> Functor3<Point3<T>> for Projected<T, tags::LessRotateCcw2> {
    type Output = bool;
    type Error = KernelError;

    fn call(&self, e: &Point3<T>, p: &Point3<T>, q: &Point3<T>) -> Result<bool, KernelError> {
        match self.orientation(e, p, q)? {
            Orientation::CounterClockwise => Ok(true),
            Orientation::Clockwise => Ok(false),
            Orientation::Collinear => {
                let (eu, ev) = self.uv(e)?;
                let (pu, pv) = self.uv(p)?;
                let (qu, qv) = self.uv(q)?;
                if (pu, pv) == (eu, ev) || (pu, pv) == (qu, qv) {
                    return Ok(false);
                }
                if (qu, qv) == (eu, ev) {
                    return Ok(true);
                }
                // Collinear with e: p comes first when q lies between e and p.
                let between = (qu - eu) * (pu - qu) + (qv - ev) * (pv - qv);
                Ok(between >= T::zero())
            }
        }
    }
}

impl<T: CoordinateScalar> Functor3<Point3<T>> for Projected<T, tags::Orientation2> {
    type Output = Orientation;
    type Error = KernelError;

    fn call(
        &self,
        p: &Point3<T>,
        q: &Point3<T>,
        r: &Point3<T>,
    ) -> Result<Orientation, KernelError> {
        self.orientation(p, q, r)
    }
}

impl<T: CoordinateScalar> ProjectionTraits2 for CartesianProjection<T> {
    type Point = Point3<T>;
    type Error = KernelError;

    type Equal2 = Projected<T, tags::Equal2>;
    type LessXy2 = Projected<T, tags::LessXy2>;
    type LessYx2 = Projected<T, tags::LessYx2>;
    type LessSignedDistanceToLine2 = Projected<T, tags::LessSignedDistanceToLine2>;
    type LeftTurn2 = Projected<T, tags::LeftTurn2>;
    type LessRotateCcw2 = Projected<T, tags::LessRotateCcw2>;
    type Orientation2 = Projected<T, tags::Orientation2>;

    fn projection(&self) -> Projection {
        self.projection
    }

    fn equal_2_object(&self) -> Self::Equal2 {
        self.functor()
    }

    fn less_xy_2_object(&self) -> Self::LessXy2 {
        self.functor()
    }

    fn less_yx_2_object(&self) -> Self::LessYx2 {
        self.functor()
    }

    fn less_signed_distance_to_line_2_object(&self) -> Self::LessSignedDistanceToLine2 {
        self.functor()
    }

    fn left_turn_2_object(&self) -> Self::LeftTurn2 {
        self.functor()
    }

    fn less_rotate_ccw_2_object(&self) -> Self::LessRotateCcw2 {
        self.functor()
    }

    fn orientation_2_object(&self) -> Self::Orientation2 {
        self.functor()
    }
}
