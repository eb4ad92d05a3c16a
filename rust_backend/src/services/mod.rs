//! Service layer for sky pixel computations.
//!
//! Services take validated domain batches and return plain data ready for a
//! notebook, the CLI, or the Python bindings.
//!
//! - [`pixel_density`]: HEALPix cell assignment and per-coordinate density
//! - [`sky_map`]: chart-ready all-sky positions, optionally density-colored

pub mod pixel_density;
pub mod sky_map;

#[cfg(test)]
mod pixel_density_tests;
#[cfg(test)]
mod sky_map_tests;

pub use pixel_density::{
    compute_pixel_density, compute_pixel_density_map, get_ppix, DensityOptions, PixelDensityMap,
};
pub use sky_map::{density_colored_sky_map, project_sky_positions, Projection, ProjectedSkyMap};
