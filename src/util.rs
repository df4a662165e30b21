use crate::errors::{VptError, VptResult};
use crate::geometry::primitives::{Point3, Projection};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng, random};

/// Generates a random seed for point cloud generation.
#[must_use]
pub fn generate_random_seed() -> u64 {
    random::<u64>()
}

fn validate_cloud(count: usize, range: f64) -> VptResult<()> {
    if count == 0 {
        return Err(VptError::InvalidParameters(
            "point count must be at least 1".to_string(),
        ));
    }
    if !range.is_finite() || range <= 0.0 {
        return Err(VptError::InvalidParameters(format!(
            "coordinate range must be positive and finite, got {range}"
        )));
    }
    Ok(())
}

/// Generates `count` points uniformly in the cube `[-range, range)^3`.
///
/// The same seed always yields the same cloud.
///
/// # Errors
///
/// Returns `InvalidParameters` for an empty cloud or a non-positive range.
pub fn generate_point_cloud(count: usize, range: f64, seed: u64) -> VptResult<Vec<Point3<f64>>> {
    validate_cloud(count, range)?;
    let mut rng = StdRng::seed_from_u64(seed);
    Ok((0..count)
        .map(|_| {
            Point3::new(
                rng.random_range(-range..range),
                rng.random_range(-range..range),
                rng.random_range(-range..range),
            )
        })
        .collect())
}

/// Generates `count` points in the coordinate plane kept by `projection`.
///
/// # Errors
///
/// Returns `InvalidParameters` for an empty cloud or a non-positive range.
pub fn generate_planar_cloud(
    count: usize,
    range: f64,
    seed: u64,
    projection: Projection,
) -> VptResult<Vec<Point3<f64>>> {
    validate_cloud(count, range)?;
    let mut rng = StdRng::seed_from_u64(seed);
    Ok((0..count)
        .map(|_| {
            let u = rng.random_range(-range..range);
            let v = rng.random_range(-range..range);
            projection.lift(u, v)
        })
        .collect())
}
