//! HEALPix equal-area pixelization of the sphere.
//!
//! The sphere is divided into 12 base faces, each split into `nside²` cells
//! of identical area. Pixels can be numbered along iso-latitude rings
//! ([`PixelScheme::Ring`]) or hierarchically within each base face
//! ([`PixelScheme::Nested`]).
//!
//! # Modules
//!
//! - [`angles`]: RA/Dec degree conversions to the (θ, φ) radians HEALPix uses
//! - [`pixel`]: angle-to-pixel mapping for both numbering schemes

pub mod angles;
pub mod pixel;


use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{SkyPixError, SkyPixResult};

pub use angles::{dec2theta, declination_to_theta, ra2phi, right_ascension_to_phi};
pub use pixel::{ang2pix, ang2pix_nest, ang2pix_ring, sky_to_pixel};

/// Largest resolution whose pixel indices fit the 64-bit index arithmetic.
pub const MAX_NSIDE: i64 = 1 << 29;

/// Resolution used by the notebooks when none is given.
pub const DEFAULT_NSIDE: i64 = 1024;

/// Validated HEALPix resolution parameter.
///
/// # Examples
///
/// ```
/// use skypix::healpix::Nside;
///
/// let nside = Nside::new(1024).unwrap();
/// assert_eq!(nside.npix(), 12 * 1024 * 1024);
/// assert!(Nside::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Nside(i64);

impl Nside {
    /// Creates a resolution, rejecting values outside `1..=MAX_NSIDE`.
    pub fn new(value: i64) -> SkyPixResult<Self> {
        if value <= 0 {
            return Err(SkyPixError::InvalidArgument(format!(
                "nside must be a positive integer, got {}",
                value
            )));
        }
        if value > MAX_NSIDE {
            return Err(SkyPixError::InvalidArgument(format!(
                "nside {} exceeds the maximum of {}",
                value, MAX_NSIDE
            )));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> i64 {
        self.0
    }

    /// Total number of cells on the sphere, `12 * nside²`.
    pub fn npix(self) -> u64 {
        12 * (self.0 as u64) * (self.0 as u64)
    }

    pub fn is_power_of_two(self) -> bool {
        (self.0 as u64).is_power_of_two()
    }

    /// Hierarchy depth, `log2(nside)`, for power-of-two resolutions.
    pub fn order(self) -> Option<u32> {
        self.is_power_of_two().then(|| self.0.trailing_zeros())
    }

    /// Solid angle of one cell in steradians.
    pub fn pixel_area(self) -> f64 {
        4.0 * std::f64::consts::PI / self.npix() as f64
    }
}

impl Default for Nside {
    fn default() -> Self {
        Self(DEFAULT_NSIDE)
    }
}

impl TryFrom<i64> for Nside {
    type Error = SkyPixError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Nside::new(value)
    }
}

impl From<Nside> for i64 {
    fn from(nside: Nside) -> Self {
        nside.0
    }
}

impl fmt::Display for Nside {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pixel numbering scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelScheme {
    /// Pixels numbered along iso-latitude rings from north to south.
    #[default]
    Ring,
    /// Pixels numbered hierarchically within each base face.
    #[serde(alias = "nest")]
    Nested,
}

impl PixelScheme {
    pub fn from_nest_flag(nest: bool) -> Self {
        if nest {
            PixelScheme::Nested
        } else {
            PixelScheme::Ring
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PixelScheme::Ring => "ring",
            PixelScheme::Nested => "nested",
        }
    }
}

impl FromStr for PixelScheme {
    type Err = SkyPixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ring" => Ok(PixelScheme::Ring),
            "nested" | "nest" => Ok(PixelScheme::Nested),
            other => Err(SkyPixError::InvalidArgument(format!(
                "unknown pixel scheme '{}'. Must be 'ring' or 'nested'",
                other
            ))),
        }
    }
}

impl fmt::Display for PixelScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
