//! Python bindings for notebook use.
//!
//! Exposes the angle converters, the pixel density mapper and sky-map
//! preparation to Python via PyO3. Sequences (lists, NumPy arrays, pandas
//! columns) are accepted wherever a list of floats is expected.
//!
//! ```python
//! import skypix
//! density = skypix.get_ppix(df["ra"].values, df["dec"].values, nside=1024)
//! ```

use pyo3::prelude::*;

use crate::core::domain::CoordinateBatch;
use crate::error::SkyPixError;
use crate::healpix::{self, Nside, PixelScheme};
use crate::services::pixel_density::{compute_pixel_density, DensityOptions};
use crate::services::sky_map::{self, Projection, ProjectedSkyMap};

fn to_py_err(err: SkyPixError) -> PyErr {
    if err.is_input_error() {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    } else {
        pyo3::exceptions::PyRuntimeError::new_err(err.to_string())
    }
}

/// Chart-ready all-sky positions.
#[pyclass(module = "skypix", get_all)]
#[derive(Debug, Clone)]
pub struct PySkyMap {
    pub projection: String,
    pub origin_deg: f64,
    pub x_rad: Vec<f64>,
    pub y_rad: Vec<f64>,
    pub tick_labels: Vec<f64>,
    pub values: Option<Vec<f64>>,
    pub ra_min: f64,
    pub ra_max: f64,
    pub dec_min: f64,
    pub dec_max: f64,
    pub total_count: usize,
}

impl From<ProjectedSkyMap> for PySkyMap {
    fn from(map: ProjectedSkyMap) -> Self {
        Self {
            projection: map.projection.to_string(),
            origin_deg: map.origin_deg,
            x_rad: map.x_rad,
            y_rad: map.y_rad,
            tick_labels: map.tick_labels,
            values: map.values,
            ra_min: map.ra_min,
            ra_max: map.ra_max,
            dec_min: map.dec_min,
            dec_max: map.dec_max,
            total_count: map.total_count,
        }
    }
}

/// Convert declinations (deg) to HEALPix θ (rad)
#[pyfunction]
pub fn dec2theta(dec: Vec<f64>) -> Vec<f64> {
    healpix::dec2theta(&dec)
}

/// Convert right ascensions (deg) to HEALPix φ (rad)
#[pyfunction]
pub fn ra2phi(ra: Vec<f64>) -> Vec<f64> {
    healpix::ra2phi(&ra)
}

/// Pixel index of each (θ, φ) pair
#[pyfunction]
#[pyo3(signature = (nside, theta, phi, nest=false))]
pub fn ang2pix(nside: i64, theta: Vec<f64>, phi: Vec<f64>, nest: bool) -> PyResult<Vec<u64>> {
    if theta.len() != phi.len() {
        return Err(to_py_err(SkyPixError::InvalidArgument(format!(
            "theta and phi differ in length: {} != {}",
            theta.len(),
            phi.len()
        ))));
    }
    let nside = Nside::new(nside).map_err(to_py_err)?;
    let scheme = PixelScheme::from_nest_flag(nest);

    theta
        .iter()
        .zip(&phi)
        .map(|(&t, &p)| match scheme {
            PixelScheme::Ring => healpix::ang2pix_ring(nside, t, p),
            PixelScheme::Nested => healpix::ang2pix_nest(nside, t, p),
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(to_py_err)
}

/// Number of coordinates sharing each coordinate's sky pixel
#[pyfunction]
#[pyo3(signature = (ra, dec, nside=1024, nest=false))]
pub fn get_ppix(ra: Vec<f64>, dec: Vec<f64>, nside: i64, nest: bool) -> PyResult<Vec<usize>> {
    let nside = Nside::new(nside).map_err(to_py_err)?;
    let batch = CoordinateBatch::from_columns(&ra, &dec).map_err(to_py_err)?;
    let options = DensityOptions::default().with_scheme(PixelScheme::from_nest_flag(nest));
    compute_pixel_density(&batch, nside, &options).map_err(to_py_err)
}

/// Prepare all-sky chart positions, optionally colored by pixel density
#[pyfunction]
#[pyo3(signature = (ra, dec, origin=0.0, projection="mollweide", nside=None))]
pub fn project_sky_positions(
    ra: Vec<f64>,
    dec: Vec<f64>,
    origin: f64,
    projection: &str,
    nside: Option<i64>,
) -> PyResult<PySkyMap> {
    let projection: Projection = projection.parse().map_err(to_py_err)?;
    let batch = CoordinateBatch::from_columns(&ra, &dec).map_err(to_py_err)?;

    let map = match nside {
        Some(nside) => {
            let nside = Nside::new(nside).map_err(to_py_err)?;
            sky_map::density_colored_sky_map(
                &batch,
                nside,
                &DensityOptions::default(),
                origin,
                projection,
            )
        }
        None => sky_map::project_sky_positions(&batch, origin, projection),
    }
    .map_err(to_py_err)?;

    Ok(map.into())
}

pub fn register_functions(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(dec2theta, m)?)?;
    m.add_function(wrap_pyfunction!(ra2phi, m)?)?;
    m.add_function(wrap_pyfunction!(ang2pix, m)?)?;
    m.add_function(wrap_pyfunction!(get_ppix, m)?)?;
    m.add_function(wrap_pyfunction!(project_sky_positions, m)?)?;
    m.add_class::<PySkyMap>()?;
    m.add("DEFAULT_NSIDE", healpix::DEFAULT_NSIDE)?;
    Ok(())
}
