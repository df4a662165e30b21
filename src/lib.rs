#![allow(clippy::multiple_crate_versions)]
#![warn(missing_docs)]

//! Handle-based geometric traits for hull algorithms.
//!
//! Geometric algorithms are written against trait bundles of small predicate
//! and construction functors over a point type. When the caller's data lives
//! behind opaque vertex handles, [`make_adapter`] wraps a point-based bundle
//! and a lookup function into a new bundle whose "points" are the handles:
//! every operation resolves its handle arguments, then delegates unchanged.
//!
//! # Key Features
//!
//! - Capability traits per arity, with fallible [`Result`]-returning operations
//! - [`VertexToPointTraits`] adapter for [`HullTraits3`] and its projections
//! - A floating-point Cartesian base kernel
//! - 2D and 3D convex hulls written once against the traits
//!
//! # Example
//!
//! ```rust
//! use vertex_point_traits::prelude::*;
//!
//! let mut store = PointStore::new();
//! let ids = store.insert_all([
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(0.0, 0.0, 1.0),
//! ]);
//! let traits = make_adapter(store.point_map(), Cartesian::new());
//! let hull = convex_hull_3(&traits, &ids).unwrap();
//! assert_eq!(hull.facet_count(), 4);
//! ```

use serde::Serialize;

// Module declarations (avoiding mod.rs files)
/// Error types for the vertex-point-traits library.
pub mod errors;

/// Configuration for hull runs.
pub mod config;

/// Utility functions for reproducible point cloud generation.
pub mod util;

/// Geometry primitives, capability traits and base kernels.
pub mod geometry {
    /// Lookup functions from keys to points.
    pub mod point_maps;
    /// Vertex-keyed point storage.
    pub mod point_store;
    /// Points, planes, orientations and projections.
    pub mod primitives;
    /// Core capability traits.
    pub mod traits;

    /// Base kernel implementations.
    pub mod backends {
        /// Cartesian floating-point kernel.
        pub mod cartesian;

        /// Call-counting kernel wrapper for testing.
        pub mod mock;
    }
}

/// Vertex-to-point traits adapters.
pub mod adapter {
    /// Resolve-then-delegate functor.
    pub mod forward;
    /// Handle-based projection bundles.
    pub mod projection;
    /// Table of forwarded operations.
    pub mod registry;
    /// Handle-based hull traits bundle.
    pub mod vertex_traits;
}

/// Convex hull algorithms generic over the capability traits.
pub mod hull {
    /// Monotone chain over a projection bundle.
    pub mod convex_hull_2;
    /// Classification plus incremental hull over a 3D bundle.
    pub mod convex_hull_3;
}

// Re-exports for convenience
pub use adapter::registry::{OperationFamily, OperationKind, OperationRole};
pub use adapter::vertex_traits::{VertexToPointTraits, make_adapter};
pub use config::{Config, TestConfig};
pub use errors::{AdapterError, VptError, VptResult};
pub use geometry::traits::{HullTraits3, PointMap, ProjectionTraits2};

/// Common imports for adapter users.
pub mod prelude {
    pub use crate::adapter::projection::ProjectionAdapter;
    pub use crate::adapter::vertex_traits::{VertexToPointTraits, make_adapter};
    pub use crate::errors::AdapterError;
    pub use crate::geometry::backends::cartesian::{Cartesian, KernelError};
    pub use crate::geometry::point_maps::{IdentityMap, SliceMap, fn_point_map};
    pub use crate::geometry::point_store::{PointStore, StoreError, VertexId};
    pub use crate::geometry::primitives::{Orientation, Plane3, Point3, Projection};
    pub use crate::geometry::traits::{
        Functor2, Functor3, Functor4, HullTraits3, PointMap, ProjectionTraits2, SeparatorFunctor1,
        SeparatorFunctor2,
    };
    pub use crate::hull::convex_hull_2::convex_hull_2;
    pub use crate::hull::convex_hull_3::{Hull3, Polyhedron, convex_hull_3};
}

use geometry::point_store::PointStore;
use geometry::primitives::Projection;
use hull::convex_hull_2::convex_hull_2;
use hull::convex_hull_3::convex_hull_3;

/// Outcome of a [`run`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Seed the point cloud was generated from
    pub seed: u64,
    /// Number of generated points
    pub points: usize,
    /// Projection used, for planar runs
    pub projection: Option<Projection>,
    /// Affine dimension of the hull, `None` when empty
    pub dimension: Option<usize>,
    /// Number of hull vertices
    pub hull_vertices: usize,
    /// Number of triangular facets (zero for planar hulls)
    pub facets: usize,
}

/// Formats the forwarded operation table, one operation per line.
#[must_use]
pub fn format_operations() -> String {
    OperationKind::ALL
        .iter()
        .map(|kind| {
            let family = match kind.family() {
                OperationFamily::Hull3 => "hull3",
                OperationFamily::Projection2 => "projection2",
            };
            let role = match kind.role() {
                OperationRole::Predicate => "predicate",
                OperationRole::Construction => "construction",
            };
            let separator = if kind.takes_separator() {
                "+separator"
            } else {
                ""
            };
            format!(
                "{:<34} {:<12} {:<13} arity {}{separator}\n",
                kind.name(),
                family,
                role,
                kind.arity()
            )
        })
        .collect()
}

/// Runs one hull computation with the given configuration.
///
/// The cloud is generated from the configured seed, stored behind vertex
/// handles, and hulled twice: over the raw points with the Cartesian kernel,
/// and over the handles with the adapter. The two results must agree once the
/// handles are resolved.
///
/// # Errors
///
/// Returns [`VptError::InvalidParameters`] for an invalid configuration,
/// kernel or store failures from either hull, and
/// [`VptError::TransparencyViolation`] if the two hulls disagree.
pub fn run(config: &Config) -> VptResult<RunSummary> {
    config.validate().map_err(VptError::InvalidParameters)?;

    let seed = config.seed.unwrap_or_else(util::generate_random_seed);
    let count = config.points as usize;
    log::info!("Number of points: {count}");
    log::info!("Seed: {seed}");
    log::info!("Coordinate range: ±{}", config.range);

    let points = if config.planar {
        util::generate_planar_cloud(count, config.range, seed, config.projection)?
    } else {
        util::generate_point_cloud(count, config.range, seed)?
    };
    let mut store = PointStore::new();
    let ids = store.insert_all(points.iter().copied());

    let kernel = config.to_kernel();
    let adapter = make_adapter(store.point_map(), kernel);

    let summary = if config.planar {
        let direct = convex_hull_2(&kernel.projection_traits(config.projection), &points)?;
        let projected = match config.projection {
            Projection::Xy => adapter.construct_traits_xy_3_object(),
            Projection::Yz => adapter.construct_traits_yz_3_object(),
            Projection::Xz => adapter.construct_traits_xz_3_object(),
        };
        let handles = convex_hull_2(&projected, &ids)?;
        let resolved = handles
            .iter()
            .map(|id| store.get(*id))
            .collect::<Result<Vec<_>, _>>()?;
        if resolved != direct {
            return Err(VptError::TransparencyViolation(format!(
                "2D hull over points has {} vertices, over handles {}",
                direct.len(),
                resolved.len()
            )));
        }
        RunSummary {
            seed,
            points: count,
            projection: Some(config.projection),
            dimension: Some(2),
            hull_vertices: direct.len(),
            facets: 0,
        }
    } else {
        let direct = convex_hull_3(&kernel, &points)?;
        let handles = convex_hull_3(&adapter, &ids)?;
        let resolved = handles.try_map(|id| store.get(id))?;
        if resolved != direct {
            return Err(VptError::TransparencyViolation(format!(
                "3D hull over points has {} facets, over handles {}",
                direct.facet_count(),
                resolved.facet_count()
            )));
        }
        RunSummary {
            seed,
            points: count,
            projection: None,
            dimension: direct.dimension(),
            hull_vertices: direct.vertex_count(),
            facets: direct.facet_count(),
        }
    };

    log::info!(
        "Hull: {} vertices, {} facets",
        summary.hull_vertices,
        summary.facets
    );
    log::info!("Point-based and handle-based hulls agree");
    Ok(summary)
}
