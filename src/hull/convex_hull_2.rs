//! 2D convex hull over a projection bundle.
//!
//! Andrew's monotone chain, written against [`ProjectionTraits2`] only, so the
//! same code runs over 3D points or over vertex handles.

use crate::geometry::traits::{Functor2, Functor3, ProjectionTraits2};

/// Stable merge sort driven by a fallible strict ordering.
///
/// The first failure aborts the sort.
pub(crate) fn try_sort_by<P, E>(
    items: Vec<P>,
    less: &impl Fn(&P, &P) -> Result<bool, E>,
) -> Result<Vec<P>, E> {
    if items.len() <= 1 {
        return Ok(items);
    }
    let mut left = items;
    let right = left.split_off(left.len() / 2);
    let left = try_sort_by(left, less)?;
    let right = try_sort_by(right, less)?;

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => less(r, l)?,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        let side = if take_right { &mut right } else { &mut left };
        merged.extend(side.next());
    }
    Ok(merged)
}

/// Convex hull of the projected points, counterclockwise.
///
/// The output starts at the `less_xy`-smallest point. Points on the boundary
/// but not at a corner are dropped, and projected duplicates are collapsed to
/// their first occurrence. Fewer than three distinct points are returned
/// sorted.
///
/// # Errors
/// Returns the first failure raised by a bundle operation
pub fn convex_hull_2<T: ProjectionTraits2>(
    traits: &T,
    points: &[T::Point],
) -> Result<Vec<T::Point>, T::Error> {
    let less_xy = traits.less_xy_2_object();
    let equal = traits.equal_2_object();
    let left_turn = traits.left_turn_2_object();

    let sorted = try_sort_by(points.to_vec(), &|a, b| less_xy.call(a, b))?;
    let mut distinct: Vec<T::Point> = Vec::with_capacity(sorted.len());
    for p in sorted {
        match distinct.last() {
            Some(last) if equal.call(last, &p)? => {}
            _ => distinct.push(p),
        }
    }
    if distinct.len() < 3 {
        return Ok(distinct);
    }

    let mut lower: Vec<T::Point> = Vec::new();
    for p in &distinct {
        while let [.., a, b] = lower.as_slice() {
            if left_turn.call(a, b, p)? {
                break;
            }
            lower.pop();
        }
        lower.push(p.clone());
    }
    let mut upper: Vec<T::Point> = Vec::new();
    for p in distinct.iter().rev() {
        while let [.., a, b] = upper.as_slice() {
            if left_turn.call(a, b, p)? {
                break;
            }
            upper.pop();
        }
        upper.push(p.clone());
    }

    lower.pop();
    upper.pop();
    lower.append(&mut upper);
    log::trace!(
        "convex_hull_2 ({}): {} points, {} on hull",
        traits.projection(),
        points.len(),
        lower.len()
    );
    Ok(lower)
}
