//! Configuration management for hull runs.
//!
//! This module provides structured configuration for a `vpt` run:
//! - Point cloud generation (count, seed, coordinate range, planar clouds)
//! - Kernel settings (zero-test tolerance)
//! - Runtime behavior options

use crate::geometry::backends::cartesian::Cartesian;
use crate::geometry::primitives::Projection;
use clap::Parser;

/// Main configuration structure for a hull run.
///
/// A run generates a point cloud, computes its hull once over raw points and
/// once over vertex handles through the adapter, and checks that both agree.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Number of points in the generated cloud
    #[arg(
        short = 'n',
        long,
        default_value = "64",
        value_parser = clap::value_parser!(u32).range(4..)
    )]
    pub points: u32,

    /// Seed for the point cloud (random if omitted)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Coordinate half-width of the generated cloud
    #[arg(short, long, default_value = "10.0")]
    pub range: f64,

    /// Distance tolerance for the kernel's zero tests
    #[arg(short, long, default_value = "0.0")]
    pub tolerance: f64,

    /// Projection used by planar runs
    #[arg(short, long, value_enum, default_value_t = Projection::Xy)]
    pub projection: Projection,

    /// Generate the cloud in the projection plane and run the 2D hull
    #[arg(long, default_value = "false")]
    pub planar: bool,

    /// Print the forwarded operation table and exit
    #[arg(long, default_value = "false")]
    pub list_operations: bool,
}

impl Config {
    /// Builds a new instance of `Config` from command line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Creates a `Config` for `points` points with default settings.
    #[must_use]
    pub const fn new(points: u32) -> Self {
        Self {
            points,
            seed: None,
            range: 10.0,
            tolerance: 0.0,
            projection: Projection::Xy,
            planar: false,
            list_operations: false,
        }
    }

    /// Same configuration with a fixed seed.
    #[must_use]
    pub const fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    /// Creates the Cartesian kernel for this configuration.
    #[must_use]
    pub const fn to_kernel(&self) -> Cartesian<f64> {
        Cartesian::with_tolerance(self.tolerance)
    }

    /// Validates the configuration parameters.
    ///
    /// # Errors
    ///
    /// Returns an error message if any parameters are invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.points < 4 {
            return Err("Number of points must be at least 4".to_string());
        }

        if !self.range.is_finite() || self.range <= 0.0 {
            return Err(format!(
                "Coordinate range must be positive and finite, got {}",
                self.range
            ));
        }

        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(format!(
                "Tolerance must be non-negative and finite, got {}",
                self.tolerance
            ));
        }

        Ok(())
    }
}

/// Configuration preset for quick testing.
#[derive(Debug, Clone)]
pub struct TestConfig;

impl TestConfig {
    /// A small seeded cloud suitable for unit tests.
    #[must_use]
    pub const fn small() -> Config {
        Config::new(16).with_seed(1)
    }

    /// A medium seeded cloud for integration tests.
    #[must_use]
    pub const fn medium() -> Config {
        Config::new(128).with_seed(2)
    }

    /// A larger cloud for performance testing.
    #[must_use]
    pub const fn large() -> Config {
        Config {
            range: 100.0,
            ..Config::new(1024).with_seed(3)
        }
    }

    /// A seeded planar cloud in the yz plane.
    #[must_use]
    pub const fn planar() -> Config {
        Config {
            projection: Projection::Yz,
            planar: true,
            ..Config::new(32).with_seed(4)
        }
    }
}
