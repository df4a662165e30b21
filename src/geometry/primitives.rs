//! Point, plane, and classification value types.
//!
//! These are the values a base kernel computes with. Handles never appear here;
//! they are resolved to these types by a [`PointMap`](super::traits::PointMap).

use super::traits::CoordinateScalar;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in three-dimensional Cartesian space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3<T: CoordinateScalar> {
    /// X coordinate
    pub x: T,
    /// Y coordinate
    pub y: T,
    /// Z coordinate
    pub z: T,
}

impl<T: CoordinateScalar> Point3<T> {
    /// Create a new point
    #[must_use]
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Coordinates as an array, in x, y, z order
    #[must_use]
    pub const fn coords(&self) -> [T; 3] {
        [self.x, self.y, self.z]
    }

    /// True if every coordinate is finite
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub(crate) fn sub(&self, other: &Self) -> [T; 3] {
        [self.x - other.x, self.y - other.y, self.z - other.z]
    }
}

impl<T: CoordinateScalar + fmt::Display> fmt::Display for Point3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// An oriented plane `a·x + b·y + c·z + d = 0`.
///
/// The positive side is the half-space where `a·x + b·y + c·z + d > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane3<T: CoordinateScalar> {
    /// X coefficient of the normal
    pub a: T,
    /// Y coefficient of the normal
    pub b: T,
    /// Z coefficient of the normal
    pub c: T,
    /// Offset
    pub d: T,
}

impl<T: CoordinateScalar> Plane3<T> {
    /// Create a plane from its coefficients
    #[must_use]
    pub const fn new(a: T, b: T, c: T, d: T) -> Self {
        Self { a, b, c, d }
    }

    /// Evaluate the plane equation at `p`. Proportional to the signed distance.
    #[must_use]
    pub fn evaluate(&self, p: &Point3<T>) -> T {
        self.a * p.x + self.b * p.y + self.c * p.z + self.d
    }

    /// Euclidean length of the normal `(a, b, c)`
    #[must_use]
    pub fn normal_length(&self) -> T {
        (self.a * self.a + self.b * self.b + self.c * self.c).sqrt()
    }

    /// True if every coefficient is finite
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.a.is_finite() && self.b.is_finite() && self.c.is_finite() && self.d.is_finite()
    }
}

/// Orientation of three points in a plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// The three points make a right turn
    Clockwise,
    /// The three points are collinear
    Collinear,
    /// The three points make a left turn
    CounterClockwise,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clockwise => write!(f, "clockwise"),
            Self::Collinear => write!(f, "collinear"),
            Self::CounterClockwise => write!(f, "counterclockwise"),
        }
    }
}

/// A 2D view of 3D points obtained by dropping one axis
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Projection {
    /// Keep x and y, drop z
    #[default]
    Xy,
    /// Keep y and z, drop x
    Yz,
    /// Keep x and z, drop y
    Xz,
}

impl Projection {
    /// All projections, in the order hull algorithms try them
    pub const ALL: [Self; 3] = [Self::Xy, Self::Yz, Self::Xz];

    /// Project a point onto the retained axes, as `(u, v)`
    #[must_use]
    pub const fn project<T: CoordinateScalar>(self, p: &Point3<T>) -> (T, T) {
        match self {
            Self::Xy => (p.x, p.y),
            Self::Yz => (p.y, p.z),
            Self::Xz => (p.x, p.z),
        }
    }

    /// Build a 3D point lying in this projection's plane through the origin
    #[must_use]
    pub fn lift<T: CoordinateScalar>(self, u: T, v: T) -> Point3<T> {
        match self {
            Self::Xy => Point3::new(u, v, T::zero()),
            Self::Yz => Point3::new(T::zero(), u, v),
            Self::Xz => Point3::new(u, T::zero(), v),
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xy => write!(f, "xy"),
            Self::Yz => write!(f, "yz"),
            Self::Xz => write!(f, "xz"),
        }
    }
}
