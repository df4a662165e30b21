//! Basic example of using the vertex-point-traits library
//!
//! This example shows how to:
//! - Store points behind vertex handles
//! - Wrap a point kernel into a handle-based traits bundle
//! - Call individual predicates on handles
//! - Run a convex hull over handles and map the result back to points

use log::{LevelFilter, info};
use vertex_point_traits::prelude::*;
use vertex_point_traits::util::generate_point_cloud;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .init();

    info!("Starting basic adapter example");

    // Store a cloud of points behind handles
    let mut store = PointStore::new();
    let ids = store.insert_all(generate_point_cloud(48, 5.0, 2026)?);
    info!("Stored {} vertices", store.len());

    // Build the handle-based bundle
    let traits = make_adapter(store.point_map(), Cartesian::new());

    // Single predicates take handles directly
    let collinear = Functor3::call(&traits.collinear_3_object(), &ids[0], &ids[1], &ids[2])?;
    info!("{}, {}, {} collinear: {collinear}", ids[0], ids[1], ids[2]);
    let orientation = Functor3::call(
        &traits.construct_traits_xy_3_object().orientation_2_object(),
        &ids[0],
        &ids[1],
        &ids[2],
    )?;
    info!("Orientation in xy: {orientation}");

    // The hull algorithm is the same one that runs over plain points
    let hull = convex_hull_3(&traits, &ids)?;
    info!(
        "Hull: {} vertices, {} facets",
        hull.vertex_count(),
        hull.facet_count()
    );

    if let Hull3::Polyhedron(poly) = &hull {
        for [a, b, c] in poly.facets.iter().take(3) {
            info!(
                "  facet {} {} {}",
                poly.vertices[*a], poly.vertices[*b], poly.vertices[*c]
            );
        }
    }

    // Resolve handles back to positions
    let points = hull.try_map(|id| store.get(id))?;
    info!("First hull vertex: {:?}", points_first(&points));

    // A stale handle surfaces as a lookup failure
    let stale = ids[0];
    store.remove(stale)?;
    let traits = make_adapter(store.point_map(), Cartesian::new());
    match traits.resolve(&stale) {
        Ok(p) => info!("Unexpectedly resolved {stale} to {p}"),
        Err(e) => info!("Lookup failed as expected: {e}"),
    }

    info!("Example completed successfully!");
    Ok(())
}

fn points_first(hull: &Hull3<Point3<f64>>) -> Option<Point3<f64>> {
    match hull {
        Hull3::Empty => None,
        Hull3::Point(p) | Hull3::Segment(p, _) => Some(*p),
        Hull3::Polygon(ring) => ring.first().copied(),
        Hull3::Polyhedron(poly) => poly.vertices.first().copied(),
    }
}
