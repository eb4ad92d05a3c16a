//! Sky pixel density mapping.
//!
//! Every coordinate of a batch is assigned to a HEALPix cell, the cells are
//! tallied, and each coordinate receives the number of batch members that
//! share its cell (itself included). Output order always matches input
//! order.

use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::domain::CoordinateBatch;
use crate::error::SkyPixResult;
use crate::healpix::{sky_to_pixel, Nside, PixelScheme};

/// Batches at least this large are pixelized on the rayon thread pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Knobs for the density computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DensityOptions {
    pub scheme: PixelScheme,
    pub parallel_threshold: usize,
}

impl Default for DensityOptions {
    fn default() -> Self {
        Self {
            scheme: PixelScheme::Ring,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl DensityOptions {
    pub fn with_scheme(mut self, scheme: PixelScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel_threshold = usize::MAX;
        self
    }
}

/// Per-coordinate cells and densities for one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixelDensityMap {
    pub nside: Nside,
    pub scheme: PixelScheme,
    /// Cell index of each input coordinate
    pub pixels: Vec<u64>,
    /// Number of batch coordinates sharing each coordinate's cell
    pub density: Vec<usize>,
    pub distinct_pixels: usize,
    pub max_density: usize,
}

/// Cell index of every coordinate, in input order.
///
/// Rejects non-finite coordinates before any index is computed.
pub fn compute_pixel_indices(
    batch: &CoordinateBatch,
    nside: Nside,
    options: &DensityOptions,
) -> SkyPixResult<Vec<u64>> {
    batch.ensure_finite()?;

    let out_of_range = batch.count_out_of_range();
    if out_of_range > 0 {
        warn!(
            "{} of {} coordinates fall outside RA [0, 360) / Dec [-90, 90]",
            out_of_range,
            batch.len()
        );
    }

    let coordinates = batch.coordinates();
    if coordinates.len() >= options.parallel_threshold {
        debug!(
            "pixelizing {} coordinates in parallel (nside={}, scheme={})",
            coordinates.len(),
            nside,
            options.scheme
        );
        coordinates
            .par_iter()
            .map(|c| sky_to_pixel(nside, options.scheme, c))
            .collect()
    } else {
        debug!(
            "pixelizing {} coordinates (nside={}, scheme={})",
            coordinates.len(),
            nside,
            options.scheme
        );
        coordinates
            .iter()
            .map(|c| sky_to_pixel(nside, options.scheme, c))
            .collect()
    }
}

/// Frequency table of cell indices.
pub fn count_pixel_occupancy(pixels: &[u64]) -> HashMap<u64, usize> {
    let mut counts = HashMap::with_capacity(pixels.len());
    for &pixel in pixels {
        *counts.entry(pixel).or_insert(0) += 1;
    }
    counts
}

/// Density count of every coordinate, in input order.
///
/// # Errors
/// - [`SkyPixError::NumericError`] for NaN or infinite coordinates
/// - [`SkyPixError::InvalidArgument`] for |dec| > 90 or a nested scheme at a
///   resolution that is not a power of two
///
/// # Examples
///
/// ```
/// use skypix::core::domain::CoordinateBatch;
/// use skypix::healpix::Nside;
/// use skypix::services::pixel_density::{compute_pixel_density, DensityOptions};
///
/// let batch = CoordinateBatch::from_columns(&[10.0, 10.0], &[20.0, 20.0]).unwrap();
/// let density = compute_pixel_density(&batch, Nside::new(1024).unwrap(), &DensityOptions::default()).unwrap();
/// assert_eq!(density, vec![2, 2]);
/// ```
pub fn compute_pixel_density(
    batch: &CoordinateBatch,
    nside: Nside,
    options: &DensityOptions,
) -> SkyPixResult<Vec<usize>> {
    Ok(compute_pixel_density_map(batch, nside, options)?.density)
}

/// Density computation that also keeps the cell of every coordinate.
pub fn compute_pixel_density_map(
    batch: &CoordinateBatch,
    nside: Nside,
    options: &DensityOptions,
) -> SkyPixResult<PixelDensityMap> {
    let pixels = compute_pixel_indices(batch, nside, options)?;
    let counts = count_pixel_occupancy(&pixels);

    let density: Vec<usize> = pixels.iter().map(|pixel| counts[pixel]).collect();
    let max_density = density.iter().copied().max().unwrap_or(0);

    Ok(PixelDensityMap {
        nside,
        scheme: options.scheme,
        distinct_pixels: counts.len(),
        max_density,
        pixels,
        density,
    })
}

/// Density counts from raw `ra`/`dec` degree columns in the ring scheme.
///
/// This is the notebook-facing shape: two equal-length columns and an
/// integer resolution.
pub fn get_ppix(ra: &[f64], dec: &[f64], nside: i64) -> SkyPixResult<Vec<usize>> {
    let nside = Nside::new(nside)?;
    let batch = CoordinateBatch::from_columns(ra, dec)?;
    compute_pixel_density(&batch, nside, &DensityOptions::default())
}
