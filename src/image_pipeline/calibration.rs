//! Calibration module
//!
//! Determines the ratio bounds that anchor normalization, either from
//! values entered by the user or from the mean of two reference images.

mod resolver;
pub mod types;

#[cfg(test)]
mod tests;

pub use resolver::CalibrationResolver;
pub use types::{CalibrationMode, CalibrationSettings};
