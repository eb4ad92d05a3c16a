//! Parsers for coordinate batch inputs.
//!
//! - [`json_parser`]: record- or column-oriented JSON exports of a catalog
//!
//! # Example
//!
//! ```no_run
//! use skypix::parsing::json_parser::parse_coordinates_json;
//! use std::path::Path;
//!
//! let batch = parse_coordinates_json(Path::new("coords.json"))
//!     .expect("Failed to parse coordinates");
//! ```

pub mod json_parser;


pub use json_parser::{parse_coordinates_json, parse_coordinates_json_str};
