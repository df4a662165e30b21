//! 3D convex hull over a [`HullTraits3`] bundle.
//!
//! The input is first classified by affine dimension. Coplanar input is solved
//! through the first projection in which it is not degenerate; full-dimensional
//! input goes through an incremental hull over triangular facets.
//!
//! Only extreme points become vertices. The seed tetrahedron and every later
//! insertion are chosen as the farthest point along some direction, with ties
//! going to the lexicographically smallest point, so points in the relative
//! interior of a face or edge never enter the hull whatever the input order.

use super::convex_hull_2::convex_hull_2;
use crate::geometry::primitives::Orientation;
use crate::geometry::traits::{
    Functor2, Functor3, Functor4, HullTraits3, ProjectionTraits2, SeparatorFunctor1,
    SeparatorFunctor2,
};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

/// Closed triangulated surface
#[derive(Debug, Clone, PartialEq)]
pub struct Polyhedron<P> {
    /// Hull vertices in input order
    pub vertices: Vec<P>,
    /// Outward-oriented triangles indexing into `vertices`
    pub facets: Vec<[usize; 3]>,
}

/// Convex hull of a 3D point set, by affine dimension
#[derive(Debug, Clone, PartialEq)]
pub enum Hull3<P> {
    /// No input points
    Empty,
    /// All points coincide
    Point(P),
    /// All points on one line; lexicographic extremes
    Segment(P, P),
    /// All points on one plane; counterclockwise in the chosen projection
    Polygon(Vec<P>),
    /// Full-dimensional input
    Polyhedron(Polyhedron<P>),
}

impl<P> Hull3<P> {
    /// Affine dimension of the hull, `None` when empty
    #[must_use]
    pub const fn dimension(&self) -> Option<usize> {
        match self {
            Self::Empty => None,
            Self::Point(_) => Some(0),
            Self::Segment(..) => Some(1),
            Self::Polygon(_) => Some(2),
            Self::Polyhedron(_) => Some(3),
        }
    }

    /// Number of hull vertices
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Point(_) => 1,
            Self::Segment(..) => 2,
            Self::Polygon(ring) => ring.len(),
            Self::Polyhedron(poly) => poly.vertices.len(),
        }
    }

    /// Number of triangular facets; zero below full dimension
    #[must_use]
    pub fn facet_count(&self) -> usize {
        match self {
            Self::Polyhedron(poly) => poly.facets.len(),
            _ => 0,
        }
    }

    /// Map every vertex, keeping the combinatorial structure
    ///
    /// # Errors
    /// Returns the first failure of `f`
    pub fn try_map<Q, E>(self, mut f: impl FnMut(P) -> Result<Q, E>) -> Result<Hull3<Q>, E> {
        Ok(match self {
            Self::Empty => Hull3::Empty,
            Self::Point(p) => Hull3::Point(f(p)?),
            Self::Segment(a, b) => Hull3::Segment(f(a)?, f(b)?),
            Self::Polygon(ring) => {
                Hull3::Polygon(ring.into_iter().map(f).collect::<Result<_, _>>()?)
            }
            Self::Polyhedron(poly) => Hull3::Polyhedron(Polyhedron {
                vertices: poly.vertices.into_iter().map(f).collect::<Result<_, _>>()?,
                facets: poly.facets,
            }),
        })
    }
}

fn compare_xyz<K: HullTraits3>(
    traits: &K,
    a: &K::Point,
    b: &K::Point,
) -> Result<Ordering, K::Error> {
    let x = traits.compare_x_3_object().call(a, b)?;
    if x != Ordering::Equal {
        return Ok(x);
    }
    let y = traits.compare_y_3_object().call(a, b)?;
    if y != Ordering::Equal {
        return Ok(y);
    }
    traits.compare_z_3_object().call(a, b)
}

fn segment<K: HullTraits3>(traits: &K, points: &[K::Point]) -> Result<Hull3<K::Point>, K::Error> {
    let (mut lo, mut hi) = (0, 0);
    for i in 1..points.len() {
        if compare_xyz(traits, &points[i], &points[lo])? == Ordering::Less {
            lo = i;
        }
        if compare_xyz(traits, &points[i], &points[hi])? == Ordering::Greater {
            hi = i;
        }
    }
    Ok(Hull3::Segment(points[lo].clone(), points[hi].clone()))
}

/// Candidate farthest above `plane` (or below it, when `above` is false).
///
/// Ties go to the lexicographically smallest point, which keeps the choice
/// on a vertex of the supporting face.
fn extreme_along<K: HullTraits3>(
    traits: &K,
    points: &[K::Point],
    plane: &K::Plane,
    candidates: impl IntoIterator<Item = usize>,
    above: bool,
) -> Result<Option<usize>, K::Error> {
    let less = traits.less_signed_distance_to_plane_3_object();
    let mut best: Option<usize> = None;
    for i in candidates {
        let Some(j) = best else {
            best = Some(i);
            continue;
        };
        let (lo, hi) = if above { (j, i) } else { (i, j) };
        let better = less.call(plane, &points[lo], &points[hi])?
            || (!less.call(plane, &points[hi], &points[lo])?
                && compare_xyz(traits, &points[i], &points[j])? == Ordering::Less);
        if better {
            best = Some(i);
        }
    }
    Ok(best)
}

/// Extreme point off the plane through `seed`, or `None` if all points are on it
fn off_plane<K: HullTraits3>(
    traits: &K,
    points: &[K::Point],
    seed: [usize; 3],
) -> Result<Option<usize>, K::Error> {
    let [a, b, c] = seed.map(|i| &points[i]);
    let plane = traits.construct_plane_3_object().call(a, b, c)?;
    let coplanar = traits.coplanar_3_object();
    for above in [true, false] {
        if let Some(m) = extreme_along(traits, points, &plane, 0..points.len(), above)? {
            if !coplanar.call(a, b, c, &points[m])? {
                return Ok(Some(m));
            }
        }
    }
    Ok(None)
}

/// Planar hull through `projection`, or `None` if the seed triangle collapses
fn planar_hull<T: ProjectionTraits2>(
    projection: &T,
    points: &[T::Point],
    seed: [usize; 3],
) -> Result<Option<Vec<T::Point>>, T::Error> {
    let [a, b, c] = seed;
    let orientation = projection
        .orientation_2_object()
        .call(&points[a], &points[b], &points[c])?;
    if orientation == Orientation::Collinear {
        return Ok(None);
    }
    convex_hull_2(projection, points).map(Some)
}

fn polygon<K: HullTraits3>(
    traits: &K,
    points: &[K::Point],
    seed: [usize; 3],
) -> Result<Hull3<K::Point>, K::Error> {
    log::debug!("convex_hull_3: {} coplanar points", points.len());
    if let Some(ring) = planar_hull(&traits.construct_traits_xy_3_object(), points, seed)? {
        return Ok(Hull3::Polygon(ring));
    }
    if let Some(ring) = planar_hull(&traits.construct_traits_yz_3_object(), points, seed)? {
        return Ok(Hull3::Polygon(ring));
    }
    if let Some(ring) = planar_hull(&traits.construct_traits_xz_3_object(), points, seed)? {
        return Ok(Hull3::Polygon(ring));
    }
    // Only reachable when the tolerance hides the seed triangle in every projection.
    let ring = seed.iter().map(|&i| points[i].clone()).collect();
    Ok(Hull3::Polygon(ring))
}

struct Facet<H> {
    corners: [usize; 3],
    plane: H,
}

/// Incremental hull seeded with a non-degenerate tetrahedron
struct Incremental<'a, K: HullTraits3> {
    traits: &'a K,
    points: &'a [K::Point],
    facets: Vec<Facet<K::Plane>>,
}

impl<'a, K: HullTraits3> Incremental<'a, K> {
    fn facet(&self, corners: [usize; 3]) -> Result<Facet<K::Plane>, K::Error> {
        let [a, b, c] = corners;
        let plane = self
            .traits
            .construct_plane_3_object()
            .call(&self.points[a], &self.points[b], &self.points[c])?;
        Ok(Facet { corners, plane })
    }

    /// Facet through `corners` with `inside` off its positive side
    fn oriented_facet(
        &self,
        corners: [usize; 3],
        inside: usize,
    ) -> Result<Facet<K::Plane>, K::Error> {
        let facet = self.facet(corners)?;
        // Compared against a corner rather than the tolerance, since `inside`
        // may sit close to a large face.
        let below = self.traits.less_signed_distance_to_plane_3_object().call(
            &facet.plane,
            &self.points[inside],
            &self.points[corners[0]],
        )?;
        if !below {
            // Swapping the leading pair keeps the edge the plane is built on.
            let [a, b, c] = corners;
            self.facet([b, a, c])
        } else {
            Ok(facet)
        }
    }

    fn seed(traits: &'a K, points: &'a [K::Point], tetra: [usize; 4]) -> Result<Self, K::Error> {
        let mut hull = Self {
            traits,
            points,
            facets: Vec::with_capacity(4),
        };
        let [a, b, c, d] = tetra;
        for (corners, inside) in [
            ([a, b, c], d),
            ([a, b, d], c),
            ([a, c, d], b),
            ([b, c, d], a),
        ] {
            let facet = hull.oriented_facet(corners, inside)?;
            hull.facets.push(facet);
        }
        Ok(hull)
    }

    /// Drop candidates no facet sees, then take the farthest point above the
    /// first facet that still sees one
    fn next_extreme(&self, outside: &mut Vec<usize>) -> Result<Option<usize>, K::Error> {
        let side = self.traits.has_on_positive_side_3_object();
        let mut kept = Vec::with_capacity(outside.len());
        let mut target: Option<usize> = None;
        for &i in outside.iter() {
            for (f, facet) in self.facets.iter().enumerate() {
                if side.call(&facet.plane, &self.points[i])? {
                    target = Some(target.map_or(f, |t| t.min(f)));
                    kept.push(i);
                    break;
                }
            }
        }
        *outside = kept;
        let Some(f) = target else {
            return Ok(None);
        };
        let plane = &self.facets[f].plane;
        let candidates = outside.iter().copied();
        let best = extreme_along(self.traits, self.points, plane, candidates, true)?;
        if let Some(b) = best {
            outside.retain(|&i| i != b);
        }
        Ok(best)
    }

    fn insert(&mut self, index: usize) -> Result<(), K::Error> {
        let side = self.traits.has_on_positive_side_3_object();
        let point = &self.points[index];
        let mut visible = Vec::with_capacity(self.facets.len());
        for facet in &self.facets {
            visible.push(side.call(&facet.plane, point)?);
        }
        if !visible.contains(&true) {
            return Ok(());
        }

        let mut edges = HashSet::new();
        for (facet, _) in self.facets.iter().zip(&visible).filter(|(_, v)| **v) {
            let [a, b, c] = facet.corners;
            edges.extend([(a, b), (b, c), (c, a)]);
        }
        let mut horizon: Vec<(usize, usize)> = edges
            .iter()
            .copied()
            .filter(|&(a, b)| !edges.contains(&(b, a)))
            .collect();
        horizon.sort_unstable();

        // A point on a horizon edge's line is within tolerance of the surface.
        let collinear = self.traits.collinear_3_object();
        for &(a, b) in &horizon {
            if collinear.call(&self.points[a], &self.points[b], point)? {
                log::trace!(
                    "convex_hull_3: point {index} lies on edge ({a}, {b}), skipped"
                );
                return Ok(());
            }
        }

        let mut kept = Vec::with_capacity(self.facets.len());
        for (facet, seen) in self.facets.drain(..).zip(visible) {
            if !seen {
                kept.push(facet);
            }
        }
        self.facets = kept;
        for (a, b) in horizon {
            let facet = self.facet([a, b, index])?;
            self.facets.push(facet);
        }
        Ok(())
    }

    fn finish(self) -> Polyhedron<K::Point> {
        let used: BTreeSet<usize> = self.facets.iter().flat_map(|f| f.corners).collect();
        let position = |i: usize| used.range(..i).count();
        let mut facets: Vec<[usize; 3]> = self
            .facets
            .iter()
            .map(|f| {
                let [a, b, c] = f.corners.map(position);
                // Rotate so the smallest index leads; orientation is preserved.
                if a <= b && a <= c {
                    [a, b, c]
                } else if b <= c {
                    [b, c, a]
                } else {
                    [c, a, b]
                }
            })
            .collect();
        facets.sort_unstable();
        Polyhedron {
            vertices: used.iter().map(|&i| self.points[i].clone()).collect(),
            facets,
        }
    }
}

/// Convex hull of `points`.
///
/// Written once against [`HullTraits3`]; over an adapter the result holds
/// handles, over a point kernel it holds points, and the two agree after
/// resolving handles.
///
/// # Errors
/// Returns the first failure raised by a bundle operation
pub fn convex_hull_3<K: HullTraits3>(
    traits: &K,
    points: &[K::Point],
) -> Result<Hull3<K::Point>, K::Error> {
    if points.is_empty() {
        return Ok(Hull3::Empty);
    }

    let mut i0 = 0;
    for i in 1..points.len() {
        if compare_xyz(traits, &points[i], &points[i0])? == Ordering::Less {
            i0 = i;
        }
    }
    let origin = &points[i0];

    let equal = traits.equal_3_object();
    let closer = traits.less_distance_to_point_3_object();
    let mut far: Option<usize> = None;
    for (i, p) in points.iter().enumerate() {
        if equal.call(origin, p)? {
            continue;
        }
        far = match far {
            Some(j) if !closer.call(origin, &points[j], p)? => Some(j),
            _ => Some(i),
        };
    }
    let Some(i1) = far else {
        return Ok(Hull3::Point(origin.clone()));
    };

    let collinear = traits.collinear_3_object();
    let mut apex = None;
    for (i, p) in points.iter().enumerate() {
        if !collinear.call(origin, &points[i1], p)? {
            apex = Some(i);
            break;
        }
    }
    let Some(apex) = apex else {
        return segment(traits, points);
    };

    let Some(i2) = off_plane(traits, points, [i0, i1, apex])? else {
        return polygon(traits, points, [i0, i1, apex]);
    };
    let Some(i3) = off_plane(traits, points, [i0, i1, i2])? else {
        return polygon(traits, points, [i0, i1, i2]);
    };

    let tetra = [i0, i1, i2, i3];
    let mut hull = Incremental::seed(traits, points, tetra)?;
    let mut outside: Vec<usize> = (0..points.len()).filter(|i| !tetra.contains(i)).collect();
    while let Some(next) = hull.next_extreme(&mut outside)? {
        hull.insert(next)?;
    }
    let poly = hull.finish();
    log::debug!(
        "convex_hull_3: {} points, {} vertices, {} facets",
        points.len(),
        poly.vertices.len(),
        poly.facets.len()
    );
    Ok(Hull3::Polyhedron(poly))
}
