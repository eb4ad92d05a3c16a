//! All-sky map preparation.
//!
//! Turns a coordinate batch into the axis values an all-sky chart expects:
//! RA is re-centred on a chosen origin, folded into (-180°, 180°], mirrored
//! so east is on the left, and converted to radians alongside Dec. Rendering
//! itself is left to the caller's charting library.

use log::{debug, warn};
use qtty::{Degrees, Radian};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::domain::CoordinateBatch;
use crate::error::{SkyPixError, SkyPixResult};
use crate::healpix::Nside;
use crate::services::pixel_density::{compute_pixel_density, DensityOptions};

/// RA tick labels, left to right, for an origin of 0°.
pub const BASE_TICK_LABELS: [f64; 11] = [
    150.0, 120.0, 90.0, 60.0, 30.0, 0.0, 330.0, 300.0, 270.0, 240.0, 210.0,
];

/// Whole-sky projections understood by common charting libraries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    #[default]
    Mollweide,
    Aitoff,
    Hammer,
    Lambert,
}

impl Projection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Projection::Mollweide => "mollweide",
            Projection::Aitoff => "aitoff",
            Projection::Hammer => "hammer",
            Projection::Lambert => "lambert",
        }
    }
}

impl FromStr for Projection {
    type Err = SkyPixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mollweide" => Ok(Projection::Mollweide),
            "aitoff" => Ok(Projection::Aitoff),
            "hammer" => Ok(Projection::Hammer),
            "lambert" => Ok(Projection::Lambert),
            other => Err(SkyPixError::InvalidArgument(format!(
                "unknown projection '{}'. Must be 'mollweide', 'aitoff', 'hammer' or 'lambert'",
                other
            ))),
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chart-ready positions for an all-sky scatter plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedSkyMap {
    pub projection: Projection,
    pub origin_deg: f64,
    /// Horizontal axis: shifted, mirrored RA in radians
    pub x_rad: Vec<f64>,
    /// Vertical axis: Dec in radians
    pub y_rad: Vec<f64>,
    pub tick_labels: Vec<f64>,
    /// Optional color channel, aligned with the positions
    pub values: Option<Vec<f64>>,
    pub ra_min: f64,
    pub ra_max: f64,
    pub dec_min: f64,
    pub dec_max: f64,
    pub total_count: usize,
}

impl ProjectedSkyMap {
    /// Attach a color channel; it must hold one value per position.
    pub fn with_values(mut self, values: Vec<f64>) -> SkyPixResult<Self> {
        if values.len() != self.total_count {
            return Err(SkyPixError::InvalidArgument(format!(
                "color values length {} does not match {} positions",
                values.len(),
                self.total_count
            )));
        }
        self.values = Some(values);
        Ok(self)
    }
}

/// Horizontal chart coordinate of an RA, in degrees.
///
/// # Examples
///
/// ```
/// use skypix::services::sky_map::shift_right_ascension;
///
/// assert_eq!(shift_right_ascension(90.0, 0.0), -90.0);
/// assert_eq!(shift_right_ascension(270.0, 0.0), 90.0);
/// assert_eq!(shift_right_ascension(30.0, 30.0), 0.0);
/// ```
pub fn shift_right_ascension(ra_deg: f64, origin_deg: f64) -> f64 {
    let mut x = (ra_deg + 360.0 - origin_deg).rem_euclid(360.0);
    if x > 180.0 {
        x -= 360.0;
    }
    -x
}

/// RA tick labels for a chart centred on `origin_deg`.
pub fn tick_labels(origin_deg: f64) -> Vec<f64> {
    BASE_TICK_LABELS
        .iter()
        .map(|label| (label + 360.0 + origin_deg).rem_euclid(360.0))
        .collect()
}

fn validate_origin(origin_deg: f64) -> SkyPixResult<()> {
    if !origin_deg.is_finite() || !(0.0..360.0).contains(&origin_deg) {
        return Err(SkyPixError::InvalidArgument(format!(
            "origin must lie in [0, 360), got {}",
            origin_deg
        )));
    }
    if origin_deg % 30.0 != 0.0 {
        warn!(
            "origin {} is not a multiple of 30 degrees; tick labels will not fall on the grid",
            origin_deg
        );
    }
    Ok(())
}

/// Compute chart positions and metadata for a coordinate batch.
pub fn project_sky_positions(
    batch: &CoordinateBatch,
    origin_deg: f64,
    projection: Projection,
) -> SkyPixResult<ProjectedSkyMap> {
    validate_origin(origin_deg)?;
    batch.ensure_finite()?;

    if batch.is_empty() {
        return Ok(ProjectedSkyMap {
            projection,
            origin_deg,
            x_rad: vec![],
            y_rad: vec![],
            tick_labels: tick_labels(origin_deg),
            values: None,
            ra_min: 0.0,
            ra_max: 360.0,
            dec_min: -90.0,
            dec_max: 90.0,
            total_count: 0,
        });
    }

    let mut ra_min = f64::MAX;
    let mut ra_max = f64::MIN;
    let mut dec_min = f64::MAX;
    let mut dec_max = f64::MIN;
    let mut x_rad = Vec::with_capacity(batch.len());
    let mut y_rad = Vec::with_capacity(batch.len());

    for coordinate in batch {
        let ra = coordinate.ra.value();
        let dec = coordinate.dec.value();
        ra_min = ra_min.min(ra);
        ra_max = ra_max.max(ra);
        dec_min = dec_min.min(dec);
        dec_max = dec_max.max(dec);

        let x = Degrees::new(shift_right_ascension(ra, origin_deg));
        x_rad.push(x.to::<Radian>().value());
        y_rad.push(coordinate.dec.to::<Radian>().value());
    }

    debug!(
        "projected {} positions for a {} map centred on {} deg",
        batch.len(),
        projection,
        origin_deg
    );

    Ok(ProjectedSkyMap {
        projection,
        origin_deg,
        x_rad,
        y_rad,
        tick_labels: tick_labels(origin_deg),
        values: None,
        ra_min,
        ra_max,
        dec_min,
        dec_max,
        total_count: batch.len(),
    })
}

/// Sky map whose color channel is the pixel density of each position.
pub fn density_colored_sky_map(
    batch: &CoordinateBatch,
    nside: Nside,
    options: &DensityOptions,
    origin_deg: f64,
    projection: Projection,
) -> SkyPixResult<ProjectedSkyMap> {
    let map = project_sky_positions(batch, origin_deg, projection)?;
    let density = compute_pixel_density(batch, nside, options)?;
    map.with_values(density.into_iter().map(|d| d as f64).collect())
}
