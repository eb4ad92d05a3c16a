//! skypix - sky pixel density mapping for survey notebooks.
//!
//! Maps equatorial coordinates onto the HEALPix equal-area pixelization,
//! counts how many coordinates share each pixel, and prepares all-sky chart
//! positions for an external plotting library.

pub mod config;
pub mod core;
pub mod error;
pub mod healpix;
pub mod parsing;
pub mod services;

#[cfg(feature = "python")]
pub mod python;

pub use error::{SkyPixError, SkyPixResult};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// skypix Python module
#[cfg(feature = "python")]
#[pymodule]
fn skypix(m: &Bound<'_, PyModule>) -> PyResult<()> {
    python::register_functions(m)
}
