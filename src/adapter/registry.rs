//! Operation registry.
//!
//! One kind per forwarded operation, with its name, the accessor that produces
//! it on a bundle, how many point (or handle) arguments it takes, and whether it
//! also takes a separator. The adapters generate their associated items from
//! this same list of kinds.

use std::fmt;

/// What an operation computes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationRole {
    /// Returns a boolean or classification
    Predicate,
    /// Returns a new geometric object
    Construction,
}

/// Which bundle trait an operation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationFamily {
    /// [`HullTraits3`](crate::geometry::traits::HullTraits3)
    Hull3,
    /// [`ProjectionTraits2`](crate::geometry::traits::ProjectionTraits2)
    Projection2,
}

/// Every operation the adapters forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Point equality
    Equal3,
    /// Three points on a line
    Collinear3,
    /// Four points on a plane
    Coplanar3,
    /// Distance comparison from a reference point
    LessDistanceToPoint3,
    /// Signed distance comparison against a plane
    LessSignedDistanceToPlane3,
    /// X ordering
    CompareX3,
    /// Y ordering
    CompareY3,
    /// Z ordering
    CompareZ3,
    /// Plane through three points
    ConstructPlane3,
    /// Strict positive side of a plane
    HasOnPositiveSide3,
    /// Projected equality
    Equal2,
    /// Projected `(u, v)` ordering
    LessXy2,
    /// Projected `(v, u)` ordering
    LessYx2,
    /// Signed distance comparison against a projected line
    LessSignedDistanceToLine2,
    /// Projected strict left turn
    LeftTurn2,
    /// Projected counterclockwise rotation ordering
    LessRotateCcw2,
    /// Projected orientation
    Orientation2,
}

impl OperationKind {
    /// All kinds in declaration order
    pub const ALL: [Self; 17] = [
        Self::Equal3,
        Self::Collinear3,
        Self::Coplanar3,
        Self::LessDistanceToPoint3,
        Self::LessSignedDistanceToPlane3,
        Self::CompareX3,
        Self::CompareY3,
        Self::CompareZ3,
        Self::ConstructPlane3,
        Self::HasOnPositiveSide3,
        Self::Equal2,
        Self::LessXy2,
        Self::LessYx2,
        Self::LessSignedDistanceToLine2,
        Self::LeftTurn2,
        Self::LessRotateCcw2,
        Self::Orientation2,
    ];

    /// Operation name, e.g. `collinear_3`
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Equal3 => "equal_3",
            Self::Collinear3 => "collinear_3",
            Self::Coplanar3 => "coplanar_3",
            Self::LessDistanceToPoint3 => "less_distance_to_point_3",
            Self::LessSignedDistanceToPlane3 => "less_signed_distance_to_plane_3",
            Self::CompareX3 => "compare_x_3",
            Self::CompareY3 => "compare_y_3",
            Self::CompareZ3 => "compare_z_3",
            Self::ConstructPlane3 => "construct_plane_3",
            Self::HasOnPositiveSide3 => "has_on_positive_side_3",
            Self::Equal2 => "equal_2",
            Self::LessXy2 => "less_xy_2",
            Self::LessYx2 => "less_yx_2",
            Self::LessSignedDistanceToLine2 => "less_signed_distance_to_line_2",
            Self::LeftTurn2 => "left_turn_2",
            Self::LessRotateCcw2 => "less_rotate_ccw_2",
            Self::Orientation2 => "orientation_2",
        }
    }

    /// Accessor producing the operation on a bundle, e.g. `collinear_3_object`
    #[must_use]
    pub fn accessor(self) -> String {
        format!("{}_object", self.name())
    }

    /// Number of point or handle arguments
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::HasOnPositiveSide3 => 1,
            Self::Equal3
            | Self::CompareX3
            | Self::CompareY3
            | Self::CompareZ3
            | Self::LessSignedDistanceToPlane3
            | Self::Equal2
            | Self::LessXy2
            | Self::LessYx2 => 2,
            Self::Collinear3
            | Self::LessDistanceToPoint3
            | Self::ConstructPlane3
            | Self::LeftTurn2
            | Self::LessRotateCcw2
            | Self::Orientation2 => 3,
            Self::Coplanar3 | Self::LessSignedDistanceToLine2 => 4,
        }
    }

    /// True if the operation takes a plane or line before its points
    #[must_use]
    pub const fn takes_separator(self) -> bool {
        matches!(
            self,
            Self::LessSignedDistanceToPlane3 | Self::HasOnPositiveSide3
        )
    }

    /// Predicate or construction
    #[must_use]
    pub const fn role(self) -> OperationRole {
        match self {
            Self::ConstructPlane3 => OperationRole::Construction,
            _ => OperationRole::Predicate,
        }
    }

    /// Bundle trait the operation belongs to
    #[must_use]
    pub const fn family(self) -> OperationFamily {
        match self {
            Self::Equal2
            | Self::LessXy2
            | Self::LessYx2
            | Self::LessSignedDistanceToLine2
            | Self::LeftTurn2
            | Self::LessRotateCcw2
            | Self::Orientation2 => OperationFamily::Projection2,
            _ => OperationFamily::Hull3,
        }
    }

    /// Kinds belonging to `family`, in declaration order
    pub fn in_family(family: OperationFamily) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(move |k| k.family() == family)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::backends::cartesian::Cartesian;
    use crate::geometry::primitives::{Plane3, Point3};
    use crate::geometry::traits::{
        Functor2, Functor3, Functor4, HullTraits3, ProjectionTraits2, SeparatorFunctor1,
        SeparatorFunctor2,
    };
    use std::collections::HashSet;

    type P = Point3<f64>;
    type H = Plane3<f64>;

    const fn two<F: Functor2<P>>(_: &F) -> (usize, bool) {
        (2, false)
    }

    const fn three<F: Functor3<P>>(_: &F) -> (usize, bool) {
        (3, false)
    }

    const fn four<F: Functor4<P>>(_: &F) -> (usize, bool) {
        (4, false)
    }

    const fn one_after_plane<F: SeparatorFunctor1<H, P>>(_: &F) -> (usize, bool) {
        (1, true)
    }

    const fn two_after_plane<F: SeparatorFunctor2<H, P>>(_: &F) -> (usize, bool) {
        (2, true)
    }

    /// Arity and separator flag of the functor trait each operation implements
    fn implemented(kind: OperationKind) -> (usize, bool) {
        use OperationKind as K;
        let k = Cartesian::<f64>::new();
        let xy = k.construct_traits_xy_3_object();
        match kind {
            K::Equal3 => two(&k.equal_3_object()),
            K::Collinear3 => three(&k.collinear_3_object()),
            K::Coplanar3 => four(&k.coplanar_3_object()),
            K::LessDistanceToPoint3 => three(&k.less_distance_to_point_3_object()),
            K::LessSignedDistanceToPlane3 => {
                two_after_plane(&k.less_signed_distance_to_plane_3_object())
            }
            K::CompareX3 => two(&k.compare_x_3_object()),
            K::CompareY3 => two(&k.compare_y_3_object()),
            K::CompareZ3 => two(&k.compare_z_3_object()),
            K::ConstructPlane3 => three(&k.construct_plane_3_object()),
            K::HasOnPositiveSide3 => one_after_plane(&k.has_on_positive_side_3_object()),
            K::Equal2 => two(&xy.equal_2_object()),
            K::LessXy2 => two(&xy.less_xy_2_object()),
            K::LessYx2 => two(&xy.less_yx_2_object()),
            K::LessSignedDistanceToLine2 => four(&xy.less_signed_distance_to_line_2_object()),
            K::LeftTurn2 => three(&xy.left_turn_2_object()),
            K::LessRotateCcw2 => three(&xy.less_rotate_ccw_2_object()),
            K::Orientation2 => three(&xy.orientation_2_object()),
        }
    }

    #[test]
    fn test_table_arity_matches_functor_traits() {
        for kind in OperationKind::ALL {
            assert_eq!(
                (kind.arity(), kind.takes_separator()),
                implemented(kind),
                "{kind}"
            );
        }
    }

    #[test]
    fn test_all_lists_each_kind_once() {
        for (i, kind) in OperationKind::ALL.iter().enumerate() {
            assert_eq!(*kind as usize, i);
        }
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = OperationKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), OperationKind::ALL.len());
    }

    #[test]
    fn test_name_suffix_matches_family() {
        for kind in OperationKind::ALL {
            let suffix = match kind.family() {
                OperationFamily::Hull3 => "_3",
                OperationFamily::Projection2 => "_2",
            };
            assert!(kind.name().ends_with(suffix), "{kind}");
        }
    }

    #[test]
    fn test_family_sizes() {
        use OperationFamily::{Hull3, Projection2};
        assert_eq!(OperationKind::in_family(Hull3).count(), 10);
        assert_eq!(OperationKind::in_family(Projection2).count(), 7);
    }

    #[test]
    fn test_role_and_accessor() {
        use OperationKind as K;
        let construction = OperationRole::Construction;
        assert_eq!(K::ConstructPlane3.role(), construction);
        let count = K::ALL.iter().filter(|k| k.role() == construction).count();
        assert_eq!(count, 1);
        assert_eq!(K::Orientation2.accessor(), "orientation_2_object");
        assert!(K::HasOnPositiveSide3.takes_separator());
    }
}
