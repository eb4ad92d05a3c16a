//! Conversions between equatorial degrees and HEALPix radians.
//!
//! Both converters are plain linear scalings. Neither one range-checks or
//! wraps its input: an RA of 400° yields a φ above 2π. Pixel lookup reduces
//! φ modulo 2π on its own, so the unwrapped value still indexes correctly.

use qtty::{Degrees, Radians};
use std::f64::consts::{FRAC_PI_2, PI};

/// Convert declination to the HEALPix polar angle θ.
///
/// θ = π/2 − (π/180)·dec, so the north pole (+90°) maps to θ = 0 and the
/// south pole (−90°) to θ = π.
///
/// # Examples
///
/// ```
/// use qtty::Degrees;
/// use skypix::healpix::declination_to_theta;
///
/// assert_eq!(declination_to_theta(Degrees::new(90.0)).value(), 0.0);
/// ```
pub fn declination_to_theta(dec: Degrees) -> Radians {
    Radians::new(FRAC_PI_2 - PI / 180.0 * dec.value())
}

/// Convert right ascension to the HEALPix azimuth φ = (π/180)·ra.
pub fn right_ascension_to_phi(ra: Degrees) -> Radians {
    Radians::new(PI / 180.0 * ra.value())
}

/// Element-wise [`declination_to_theta`] over raw degree values.
pub fn dec2theta(dec_deg: &[f64]) -> Vec<f64> {
    dec_deg
        .iter()
        .map(|&dec| declination_to_theta(Degrees::new(dec)).value())
        .collect()
}

/// Element-wise [`right_ascension_to_phi`] over raw degree values.
pub fn ra2phi(ra_deg: &[f64]) -> Vec<f64> {
    ra_deg
        .iter()
        .map(|&ra| right_ascension_to_phi(Degrees::new(ra)).value())
        .collect()
}
