//! Resolve-then-delegate functor.
//!
//! [`Forward`] wraps one base operation together with the lookup function. It
//! implements every arity trait its base implements, with handles in place of
//! points: arguments are resolved left to right, the first failed lookup ends
//! the call, and only a fully resolved argument list reaches the base.

use super::registry::OperationKind;
use crate::errors::AdapterError;
use crate::geometry::traits::{
    Functor2, Functor3, Functor4, PointMap, SeparatorFunctor1, SeparatorFunctor2,
};

/// Handle-based view of a point-based operation
#[derive(Debug, Clone)]
pub struct Forward<F, M> {
    kind: OperationKind,
    map: M,
    base: F,
}

impl<F, M> Forward<F, M> {
    /// Wrap `base` so that it accepts handles resolved through `map`
    pub const fn new(kind: OperationKind, map: M, base: F) -> Self {
        Self { kind, map, base }
    }

    /// Operation this functor forwards
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        self.kind
    }

    /// The wrapped base operation
    #[must_use]
    pub const fn base(&self) -> &F {
        &self.base
    }
}

impl<F, M: PointMap> Forward<F, M> {
    fn resolve<E>(&self, key: &M::Key) -> Result<M::Point, AdapterError<M::Error, E>> {
        self.map.get(key).map_err(|e| {
            log::trace!("{}: lookup failed: {e}", self.kind);
            AdapterError::Lookup(e)
        })
    }
}

impl<F, M> Functor2<M::Key> for Forward<F, M>
where
    M: PointMap,
    F: Functor2<M::Point>,
{
    type Output = F::Output;
    type Error = AdapterError<M::Error, F::Error>;

    fn call(&self, a: &M::Key, b: &M::Key) -> Result<Self::Output, Self::Error> {
        let a = self.resolve::<F::Error>(a)?;
        let b = self.resolve::<F::Error>(b)?;
        self.base.call(&a, &b).map_err(AdapterError::Predicate)
    }
}

impl<F, M> Functor3<M::Key> for Forward<F, M>
where
    M: PointMap,
    F: Functor3<M::Point>,
{
    type Output = F::Output;
    type Error = AdapterError<M::Error, F::Error>;

    fn call(&self, a: &M::Key, b: &M::Key, c: &M::Key) -> Result<Self::Output, Self::Error> {
        let a = self.resolve::<F::Error>(a)?;
        let b = self.resolve::<F::Error>(b)?;
        let c = self.resolve::<F::Error>(c)?;
        self.base.call(&a, &b, &c).map_err(AdapterError::Predicate)
    }
}

impl<F, M> Functor4<M::Key> for Forward<F, M>
where
    M: PointMap,
    F: Functor4<M::Point>,
{
    type Output = F::Output;
    type Error = AdapterError<M::Error, F::Error>;

    fn call(
        &self,
        a: &M::Key,
        b: &M::Key,
        c: &M::Key,
        d: &M::Key,
    ) -> Result<Self::Output, Self::Error> {
        let a = self.resolve::<F::Error>(a)?;
        let b = self.resolve::<F::Error>(b)?;
        let c = self.resolve::<F::Error>(c)?;
        let d = self.resolve::<F::Error>(d)?;
        self.base
            .call(&a, &b, &c, &d)
            .map_err(AdapterError::Predicate)
    }
}

impl<S, F, M> SeparatorFunctor1<S, M::Key> for Forward<F, M>
where
    M: PointMap,
    F: SeparatorFunctor1<S, M::Point>,
{
    type Output = F::Output;
    type Error = AdapterError<M::Error, F::Error>;

    fn call(&self, separator: &S, a: &M::Key) -> Result<Self::Output, Self::Error> {
        let a = self.resolve::<F::Error>(a)?;
        self.base
            .call(separator, &a)
            .map_err(AdapterError::Predicate)
    }
}

impl<S, F, M> SeparatorFunctor2<S, M::Key> for Forward<F, M>
where
    M: PointMap,
    F: SeparatorFunctor2<S, M::Point>,
{
    type Output = F::Output;
    type Error = AdapterError<M::Error, F::Error>;

    fn call(&self, separator: &S, a: &M::Key, b: &M::Key) -> Result<Self::Output, Self::Error> {
        let a = self.resolve::<F::Error>(a)?;
        let b = self.resolve::<F::Error>(b)?;
        self.base
            .call(separator, &a, &b)
            .map_err(AdapterError::Predicate)
    }
}

/// Mirror base accessors as [`Forward`] functors sharing the adapter's map.
///
/// Expands to one associated type and one accessor per `Kind => accessor` row;
/// `Kind` names both the base bundle's associated type and the registry entry.
macro_rules! forward_functors {
    ($base:ident, $map:ident; $($op:ident => $accessor:ident),* $(,)?) => {
        $(
            type $op = $crate::adapter::forward::Forward<$base::$op, $map>;

            fn $accessor(&self) -> Self::$op {
                $crate::adapter::forward::Forward::new(
                    $crate::adapter::registry::OperationKind::$op,
                    self.map.clone(),
                    self.base.$accessor(),
                )
            }
        )*
    };
}

pub(crate) use forward_functors;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point_maps::{SliceMap, SliceMapError, fn_point_map};
    use std::cell::RefCell;
    use std::convert::Infallible;

    /// Sum of its arguments; never fails
    #[derive(Debug, Clone, Copy)]
    struct Sum;

    impl Functor3<i64> for Sum {
        type Output = i64;
        type Error = Infallible;

        fn call(&self, a: &i64, b: &i64, c: &i64) -> Result<i64, Infallible> {
            Ok(a + b + c)
        }
    }

    /// Difference of its arguments; fails on equal arguments
    #[derive(Debug, Clone, Copy)]
    struct StrictDifference;

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("equal arguments")]
    struct EqualArguments;

    impl Functor2<i64> for StrictDifference {
        type Output = i64;
        type Error = EqualArguments;

        fn call(&self, a: &i64, b: &i64) -> Result<i64, EqualArguments> {
            if a == b {
                Err(EqualArguments)
            } else {
                Ok(a - b)
            }
        }
    }

    #[test]
    fn test_forward_resolves_then_delegates() {
        let values = [10, 20, 30];
        let sum = Forward::new(OperationKind::Collinear3, SliceMap::new(&values), Sum);
        assert_eq!(Functor3::call(&sum, &0, &1, &2), Ok(60));
        assert_eq!(Functor3::call(&sum, &2, &2, &0), Ok(70));
        assert_eq!(sum.kind(), OperationKind::Collinear3);
    }

    #[test]
    fn test_forward_propagates_base_failure() {
        let values = [5, 5, 7];
        let map = SliceMap::new(&values);
        let diff = Forward::new(OperationKind::Equal3, map, StrictDifference);
        assert_eq!(Functor2::call(&diff, &2, &0), Ok(2));
        let failed = Functor2::call(&diff, &0, &1);
        assert_eq!(failed, Err(AdapterError::Predicate(EqualArguments)));
    }

    #[test]
    fn test_forward_stops_at_first_failed_lookup() {
        let values = [1_i64, 2, 3];
        let looked_up = RefCell::new(Vec::new());
        let map = fn_point_map(|k: &usize| {
            looked_up.borrow_mut().push(*k);
            values.get(*k).copied().ok_or(SliceMapError {
                index: *k,
                len: values.len(),
            })
        });
        let sum = Forward::new(OperationKind::Collinear3, &map, Sum);

        let result = Functor3::call(&sum, &0, &9, &1);
        assert_eq!(
            result,
            Err(AdapterError::Lookup(SliceMapError { index: 9, len: 3 }))
        );
        // Arguments after the failing one are never resolved.
        assert_eq!(*looked_up.borrow(), vec![0, 9]);
    }
}
