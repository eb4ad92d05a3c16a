//! Angle-to-pixel mapping.
//!
//! Follows the HEALPix `loc2pix` construction (Górski et al. 2005): the
//! equatorial belt `|z| <= 2/3` is indexed along two families of edge lines
//! (`jp` ascending, `jm` descending); the polar caps use a rescaled distance
//! from the pole. Close to a pole `sin θ` replaces `sqrt(1 - |z|)` to keep
//! precision.

use qtty::Radians;
use std::f64::consts::{FRAC_2_PI, PI, TAU};

use super::angles::{declination_to_theta, right_ascension_to_phi};
use super::{Nside, PixelScheme};
use crate::core::domain::SkyCoordinate;
use crate::error::{SkyPixError, SkyPixResult};

const TWO_THIRDS: f64 = 2.0 / 3.0;

/// θ margin under which the polar branch switches to `sin θ`.
const POLAR_PRECISION_MARGIN: f64 = 0.01;

/// Pixel index of the direction (θ, φ) at the given resolution.
///
/// # Errors
/// - [`SkyPixError::NumericError`] if θ or φ is not finite
/// - [`SkyPixError::InvalidArgument`] if θ is outside [0, π], or for the
///   nested scheme with a resolution that is not a power of two
///
/// # Examples
///
/// ```
/// use qtty::Radians;
/// use skypix::healpix::{ang2pix, Nside, PixelScheme};
///
/// let nside = Nside::new(16).unwrap();
/// let theta = Radians::new(std::f64::consts::FRAC_PI_2);
/// let pix = ang2pix(nside, PixelScheme::Ring, theta, Radians::new(0.0)).unwrap();
/// assert_eq!(pix, 1440);
/// ```
pub fn ang2pix(nside: Nside, scheme: PixelScheme, theta: Radians, phi: Radians) -> SkyPixResult<u64> {
    match scheme {
        PixelScheme::Ring => ang2pix_ring(nside, theta.value(), phi.value()),
        PixelScheme::Nested => ang2pix_nest(nside, theta.value(), phi.value()),
    }
}

/// Pixel index of a sky coordinate, converting Dec→θ and RA→φ first.
pub fn sky_to_pixel(nside: Nside, scheme: PixelScheme, coordinate: &SkyCoordinate) -> SkyPixResult<u64> {
    let theta = declination_to_theta(coordinate.dec);
    let phi = right_ascension_to_phi(coordinate.ra);
    ang2pix(nside, scheme, theta, phi)
}

/// RING-scheme pixel index of (θ, φ) in radians.
pub fn ang2pix_ring(nside: Nside, theta: f64, phi: f64) -> SkyPixResult<u64> {
    let loc = Location::new(theta, phi)?;
    Ok(ring_index(nside.get(), &loc))
}

/// NESTED-scheme pixel index of (θ, φ) in radians.
pub fn ang2pix_nest(nside: Nside, theta: f64, phi: f64) -> SkyPixResult<u64> {
    let order = nside.order().ok_or_else(|| {
        SkyPixError::InvalidArgument(format!(
            "nested scheme requires a power-of-two nside, got {}",
            nside
        ))
    })?;
    let loc = Location::new(theta, phi)?;
    Ok(nest_index(nside.get(), order, &loc))
}

/// A direction reduced to the quantities both schemes index with.
struct Location {
    /// cos θ
    z: f64,
    za: f64,
    /// sin θ, only kept near the poles
    sth: Option<f64>,
    /// φ mapped onto [0, 4), one unit per base-face column
    tt: f64,
}

impl Location {
    fn new(theta: f64, phi: f64) -> SkyPixResult<Self> {
        if !theta.is_finite() || !phi.is_finite() {
            return Err(SkyPixError::NumericError(format!(
                "angles must be finite, got theta={} phi={}",
                theta, phi
            )));
        }
        if !(0.0..=PI).contains(&theta) {
            return Err(SkyPixError::InvalidArgument(format!(
                "theta must lie in [0, pi], got {}",
                theta
            )));
        }

        let z = theta.cos();
        let near_pole = theta < POLAR_PRECISION_MARGIN || theta > PI - POLAR_PRECISION_MARGIN;

        Ok(Self {
            z,
            za: z.abs(),
            sth: near_pole.then(|| theta.sin()),
            tt: reduce_phi(phi) * FRAC_2_PI,
        })
    }

    /// Scaled distance from the nearest pole, in units of ring spacing.
    fn polar_distance(&self, nside: f64) -> f64 {
        match self.sth {
            Some(sth) if self.za >= 0.99 => nside * sth / ((1.0 + self.za) / 3.0).sqrt(),
            _ => nside * (3.0 * (1.0 - self.za)).sqrt(),
        }
    }
}

/// Reduce φ to [0, 2π).
fn reduce_phi(phi: f64) -> f64 {
    let reduced = phi.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if reduced >= TAU {
        0.0
    } else {
        reduced
    }
}

fn ring_index(nside: i64, loc: &Location) -> u64 {
    let ns = nside as f64;

    if loc.za <= TWO_THIRDS {
        let nl4 = 4 * nside;
        let temp1 = ns * (0.5 + loc.tt);
        let temp2 = ns * loc.z * 0.75;
        let jp = (temp1 - temp2) as i64;
        let jm = (temp1 + temp2) as i64;

        // ring number counted from z = 2/3, in 1..=2*nside+1
        let ir = nside + 1 + jp - jm;
        let kshift = 1 - (ir & 1);
        let t1 = jp + jm - nside + kshift + 1 + 2 * nl4;
        let ip = (t1 >> 1) % nl4;

        let ncap = 2 * nside * (nside - 1);
        (ncap + (ir - 1) * nl4 + ip) as u64
    } else {
        let tp = loc.tt - loc.tt.floor();
        let tmp = loc.polar_distance(ns);
        let jp = (tp * tmp) as i64;
        let jm = ((1.0 - tp) * tmp) as i64;

        // ring number counted from the closest pole
        let ir = jp + jm + 1;
        let ip = ((loc.tt * ir as f64) as i64).rem_euclid(4 * ir);

        if loc.z > 0.0 {
            (2 * ir * (ir - 1) + ip) as u64
        } else {
            (12 * nside * nside - 2 * ir * (ir + 1) + ip) as u64
        }
    }
}

fn nest_index(nside: i64, order: u32, loc: &Location) -> u64 {
    let ns = nside as f64;
    let mask = nside - 1;

    let (face, ix, iy) = if loc.za <= TWO_THIRDS {
        let temp1 = ns * (0.5 + loc.tt);
        let temp2 = ns * loc.z * 0.75;
        let jp = (temp1 - temp2) as i64;
        let jm = (temp1 + temp2) as i64;
        let ifp = jp >> order;
        let ifm = jm >> order;

        let face = if ifp == ifm {
            ifp | 4
        } else if ifp < ifm {
            ifp
        } else {
            ifm + 8
        };
        (face, jm & mask, nside - (jp & mask) - 1)
    } else {
        let ntt = (loc.tt as i64).min(3);
        let tp = loc.tt - ntt as f64;
        let tmp = loc.polar_distance(ns);
        let jp = ((tp * tmp) as i64).min(mask);
        let jm = (((1.0 - tp) * tmp) as i64).min(mask);

        if loc.z >= 0.0 {
            (ntt, nside - jm - 1, nside - jp - 1)
        } else {
            (ntt + 8, jp, jm)
        }
    };

    face as u64 * (nside as u64) * (nside as u64) + interleave_bits(ix as u64, iy as u64, order)
}

/// Morton-interleave the in-face coordinates: x bits land on even positions.
fn interleave_bits(ix: u64, iy: u64, order: u32) -> u64 {
    (0..order).fold(0, |acc, bit| {
        acc | (((ix >> bit) & 1) << (2 * bit)) | (((iy >> bit) & 1) << (2 * bit + 1))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interleave_bits() {
        assert_eq!(interleave_bits(0, 0, 2), 0);
        assert_eq!(interleave_bits(1, 0, 2), 1);
        assert_eq!(interleave_bits(0, 1, 2), 2);
        assert_eq!(interleave_bits(1, 1, 2), 3);
        assert_eq!(interleave_bits(3, 3, 2), 15);
    }

    #[test]
    fn test_reduce_phi() {
        assert_eq!(reduce_phi(0.0), 0.0);
        assert!((reduce_phi(-PI) - PI).abs() < 1e-15);
        assert!((reduce_phi(TAU + 1.0) - 1.0).abs() < 1e-12);
        assert!(reduce_phi(-1e-300) < TAU);
    }
}
