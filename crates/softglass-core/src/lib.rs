//! # Softglass Core
//!
//! Core types and utilities shared by the Softglass crates: the error
//! taxonomy, centimetre/metre conversions and label formatting, and the
//! 2-D geometry primitives every outline is built from.

pub mod error;
pub mod geometry;
pub mod units;

pub use error::{ConfigError, Error, Result, ValidationError};
pub use geometry::{Point, Rect};
pub use units::{cm2_to_m2, cm_to_m, format_cm_label, parse_cm};
