//! Core domain models for sky coordinate batches.
//!
//! This module defines the fundamental data structures shared by the pixel
//! density mapper, the sky-map preparation service and the parsers.

pub mod domain;


pub use domain::{CoordinateBatch, SkyCoordinate};
