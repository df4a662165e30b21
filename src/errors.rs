//! Error types for the vertex-point-traits library.

use crate::geometry::backends::cartesian::KernelError;
use crate::geometry::point_store::StoreError;

/// Failure of an adapted operation.
///
/// Both variants carry the collaborator's failure unchanged; the adapter adds
/// no context of its own.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError<L, P> {
    /// The lookup function could not resolve a handle
    #[error(transparent)]
    Lookup(L),
    /// The base operation failed on the resolved points
    #[error(transparent)]
    Predicate(P),
}

impl<L, P> AdapterError<L, P> {
    /// True for lookup failures
    #[must_use]
    pub const fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup(_))
    }

    /// The lookup failure, if this is one
    #[must_use]
    pub const fn as_lookup(&self) -> Option<&L> {
        match self {
            Self::Lookup(e) => Some(e),
            Self::Predicate(_) => None,
        }
    }

    /// The base operation failure, if this is one
    #[must_use]
    pub const fn as_predicate(&self) -> Option<&P> {
        match self {
            Self::Predicate(e) => Some(e),
            Self::Lookup(_) => None,
        }
    }
}

/// Main error type for library entry points.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VptError {
    /// Invalid run parameters
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// The Cartesian kernel rejected its input
    #[error("Kernel failure: {0}")]
    Kernel(#[from] KernelError),

    /// The point store could not resolve a handle
    #[error("Point store failure: {0}")]
    Store(#[from] StoreError),

    /// Point-based and handle-based runs disagreed
    #[error("Transparency violation: {0}")]
    TransparencyViolation(String),
}

impl From<AdapterError<StoreError, KernelError>> for VptError {
    fn from(e: AdapterError<StoreError, KernelError>) -> Self {
        match e {
            AdapterError::Lookup(e) => Self::Store(e),
            AdapterError::Predicate(e) => Self::Kernel(e),
        }
    }
}

/// Result type for library entry points.
pub type VptResult<T> = Result<T, VptError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[test]
    fn test_adapter_error_is_transparent() {
        let kernel = KernelError::DegenerateConfiguration("plane through collinear points");
        let adapted: AdapterError<Infallible, KernelError> =
            AdapterError::Predicate(kernel.clone());
        assert_eq!(adapted.to_string(), kernel.to_string());
        assert!(!adapted.is_lookup());
        assert_eq!(adapted.as_predicate(), Some(&kernel));
    }

    #[test]
    fn test_vpt_error_from_adapter_error() {
        let kernel = KernelError::NonFinitePlane;
        let err = VptError::from(AdapterError::<StoreError, KernelError>::Predicate(
            kernel.clone(),
        ));
        assert_eq!(err, VptError::Kernel(kernel));
    }
}
