//! Vertex-point-traits binary executable.
//!
//! Generates a point cloud, hulls it over raw points and over vertex handles,
//! and checks that both runs agree.

use vertex_point_traits::{Config, format_operations, run};

fn main() {
    // Initialize logging
    env_logger::init();

    let config = Config::from_args();
    if config.list_operations {
        print!("{}", format_operations());
        return;
    }

    match run(&config) {
        Ok(summary) => {
            log::info!("Hull run completed successfully (seed {})", summary.seed);
        }
        Err(e) => {
            log::error!("Hull run failed: {e}");
            std::process::exit(1);
        }
    }
}
