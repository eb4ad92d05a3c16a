//! Domain models for equatorial sky coordinates.
//!
//! A [`CoordinateBatch`] is the unit of work for every service in the crate:
//! an ordered list of [`SkyCoordinate`]s whose order is preserved in every
//! per-coordinate output.

use qtty::Degrees;
use serde::{Deserialize, Serialize};

use crate::error::{SkyPixError, SkyPixResult};

/// A position on the sky in the equatorial system.
///
/// Right ascension is conventionally in [0, 360) and declination in
/// [-90, 90], both in degrees. Neither range is enforced here; see
/// [`CoordinateBatch::ensure_finite`] for the checks the mapper relies on.
///
/// # Examples
///
/// ```
/// use skypix::core::domain::SkyCoordinate;
///
/// let c = SkyCoordinate::from_degrees(10.0, 20.0);
/// assert_eq!(c.ra.value(), 10.0);
/// assert_eq!(c.dec.value(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkyCoordinate {
    pub ra: Degrees,
    pub dec: Degrees,
}

impl SkyCoordinate {
    /// Creates a coordinate from typed angles.
    pub fn new(ra: Degrees, dec: Degrees) -> Self {
        Self { ra, dec }
    }

    /// Creates a coordinate from raw degree values.
    pub fn from_degrees(ra_deg: f64, dec_deg: f64) -> Self {
        Self::new(Degrees::new(ra_deg), Degrees::new(dec_deg))
    }

    /// Returns true when RA lies in [0, 360) and Dec in [-90, 90].
    pub fn is_in_conventional_range(&self) -> bool {
        let ra = self.ra.value();
        let dec = self.dec.value();
        (0.0..360.0).contains(&ra) && (-90.0..=90.0).contains(&dec)
    }
}

/// An ordered batch of sky coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordinateBatch {
    coordinates: Vec<SkyCoordinate>,
}

impl CoordinateBatch {
    pub fn new(coordinates: Vec<SkyCoordinate>) -> Self {
        Self { coordinates }
    }

    /// Builds a batch from two column slices (`ra`, `dec`) in degrees.
    ///
    /// # Errors
    /// Returns [`SkyPixError::InvalidArgument`] when the columns differ in
    /// length.
    ///
    /// # Examples
    ///
    /// ```
    /// use skypix::core::domain::CoordinateBatch;
    ///
    /// let batch = CoordinateBatch::from_columns(&[10.0, 11.0], &[20.0, 21.0]).unwrap();
    /// assert_eq!(batch.len(), 2);
    ///
    /// assert!(CoordinateBatch::from_columns(&[10.0], &[]).is_err());
    /// ```
    pub fn from_columns(ra: &[f64], dec: &[f64]) -> SkyPixResult<Self> {
        if ra.len() != dec.len() {
            return Err(SkyPixError::InvalidArgument(format!(
                "ra and dec columns differ in length: {} != {}",
                ra.len(),
                dec.len()
            )));
        }

        let coordinates = ra
            .iter()
            .zip(dec)
            .map(|(&ra, &dec)| SkyCoordinate::from_degrees(ra, dec))
            .collect();

        Ok(Self { coordinates })
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    pub fn coordinates(&self) -> &[SkyCoordinate] {
        &self.coordinates
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SkyCoordinate> {
        self.coordinates.iter()
    }

    /// Right ascension column in degrees.
    pub fn ra_values(&self) -> Vec<f64> {
        self.coordinates.iter().map(|c| c.ra.value()).collect()
    }

    /// Declination column in degrees.
    pub fn dec_values(&self) -> Vec<f64> {
        self.coordinates.iter().map(|c| c.dec.value()).collect()
    }

    /// Rejects the batch if any coordinate holds NaN or an infinity.
    ///
    /// The error names the first offending row and column.
    pub fn ensure_finite(&self) -> SkyPixResult<()> {
        for (index, coordinate) in self.coordinates.iter().enumerate() {
            let ra = coordinate.ra.value();
            if !ra.is_finite() {
                return Err(SkyPixError::NumericError(format!(
                    "non-finite ra at index {}: {}",
                    index, ra
                )));
            }
            let dec = coordinate.dec.value();
            if !dec.is_finite() {
                return Err(SkyPixError::NumericError(format!(
                    "non-finite dec at index {}: {}",
                    index, dec
                )));
            }
        }
        Ok(())
    }

    /// Number of coordinates outside the conventional RA/Dec ranges.
    pub fn count_out_of_range(&self) -> usize {
        self.coordinates
            .iter()
            .filter(|c| !c.is_in_conventional_range())
            .count()
    }
}

impl From<Vec<SkyCoordinate>> for CoordinateBatch {
    fn from(coordinates: Vec<SkyCoordinate>) -> Self {
        Self::new(coordinates)
    }
}

impl FromIterator<SkyCoordinate> for CoordinateBatch {
    fn from_iter<I: IntoIterator<Item = SkyCoordinate>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CoordinateBatch {
    type Item = &'a SkyCoordinate;
    type IntoIter = std::slice::Iter<'a, SkyCoordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.coordinates.iter()
    }
}
