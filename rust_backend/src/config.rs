//! Configuration file support.
//!
//! Defaults for the density mapper and sky-map preparation can be kept in a
//! `skypix.toml` file:
//!
//! ```toml
//! [density]
//! nside = 1024
//! scheme = "ring"
//! parallel_threshold = 4096
//!
//! [projection]
//! origin_deg = 0.0
//! kind = "mollweide"
//! ```
//!
//! Every section and field is optional.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{SkyPixError, SkyPixResult};
use crate::healpix::{Nside, PixelScheme, DEFAULT_NSIDE};
use crate::services::pixel_density::{DensityOptions, DEFAULT_PARALLEL_THRESHOLD};
use crate::services::sky_map::Projection;

/// Name of the configuration file searched by [`SkyPixConfig::from_default_location`].
pub const CONFIG_FILE_NAME: &str = "skypix.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkyPixConfig {
    #[serde(default)]
    pub density: DensitySettings,
    #[serde(default)]
    pub projection: ProjectionSettings,
}

/// Density mapper settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensitySettings {
    #[serde(default = "default_nside")]
    pub nside: i64,
    #[serde(default)]
    pub scheme: PixelScheme,
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

/// Sky-map preparation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSettings {
    #[serde(default)]
    pub origin_deg: f64,
    #[serde(default)]
    pub kind: Projection,
}

fn default_nside() -> i64 {
    DEFAULT_NSIDE
}

fn default_parallel_threshold() -> usize {
    DEFAULT_PARALLEL_THRESHOLD
}

impl Default for DensitySettings {
    fn default() -> Self {
        Self {
            nside: default_nside(),
            scheme: PixelScheme::default(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            origin_deg: 0.0,
            kind: Projection::default(),
        }
    }
}

impl SkyPixConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(SkyPixConfig)` if the file was read, parsed and validated
    /// * `Err(SkyPixError::ConfigurationError)` otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> SkyPixResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            SkyPixError::ConfigurationError(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> SkyPixResult<Self> {
        let config: SkyPixConfig = toml::from_str(content).map_err(|e| {
            SkyPixError::ConfigurationError(format!("Failed to parse config file: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `skypix.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> SkyPixResult<Self> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("rust_backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in &search_paths {
            if path.exists() {
                log::debug!("loading configuration from {}", path.display());
                return Self::from_file(path);
            }
        }

        Err(SkyPixError::ConfigurationError(format!(
            "No {} found in standard locations",
            CONFIG_FILE_NAME
        )))
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> SkyPixResult<()> {
        let nside = self.nside()?;
        if self.density.scheme == PixelScheme::Nested && !nside.is_power_of_two() {
            return Err(SkyPixError::ConfigurationError(format!(
                "nested scheme requires a power-of-two nside, got {}",
                nside
            )));
        }
        if self.density.parallel_threshold == 0 {
            return Err(SkyPixError::ConfigurationError(
                "parallel_threshold must be at least 1".to_string(),
            ));
        }
        let origin = self.projection.origin_deg;
        if !origin.is_finite() || !(0.0..360.0).contains(&origin) {
            return Err(SkyPixError::ConfigurationError(format!(
                "projection origin must lie in [0, 360), got {}",
                origin
            )));
        }
        Ok(())
    }

    pub fn nside(&self) -> SkyPixResult<Nside> {
        Nside::new(self.density.nside)
            .map_err(|e| SkyPixError::ConfigurationError(e.to_string()))
    }

    pub fn density_options(&self) -> DensityOptions {
        DensityOptions {
            scheme: self.density.scheme,
            parallel_threshold: self.density.parallel_threshold,
        }
    }
}
