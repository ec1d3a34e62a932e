//! Ratio to pH conversion module
//!
//! Per-sample normalization against the calibration bounds followed by the
//! cubic pH model, and its application over whole image buffers.

mod pixel;
mod transform;
pub mod types;


pub use pixel::{convert_to_ph, normalize};
pub use transform::{NO_DATA, convert_sample, transform};
pub use types::{CalibrationBounds, PhImage, PolynomialCoefficients};
