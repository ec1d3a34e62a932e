//! Conversion data types

use serde::{Deserialize, Serialize};

use crate::image_pipeline::common::error::{ConversionError, Result};

/// Ratio values matching the low and high ends of the pH range.
///
/// Built once per run and read-only afterwards. Construction rejects
/// non-finite or equal bounds so normalization never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationBounds {
    lower: f64,
    upper: f64,
}

impl CalibrationBounds {
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(ConversionError::ConfigError(format!(
                "calibration values must be finite (lower={}, upper={})",
                lower, upper
            )));
        }
        if lower == upper {
            return Err(ConversionError::ConfigError(format!(
                "lower and upper calibration values are identical ({})",
                lower
            )));
        }
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }
}

/// Coefficients of the cubic model `B3·n³ + B2·n² + B1·n + B0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolynomialCoefficients {
    pub b3: f64,
    pub b2: f64,
    pub b1: f64,
    pub b0: f64,
}

impl Default for PolynomialCoefficients {
    fn default() -> Self {
        Self {
            b3: 3.4347,
            b2: -5.7843,
            b1: 4.2768,
            b0: 5.0497,
        }
    }
}

impl PolynomialCoefficients {
    pub fn new(b3: f64, b2: f64, b1: f64, b0: f64) -> Self {
        Self { b3, b2, b1, b0 }
    }
}

/// Single-channel pH map, NaN where no value is defined.
#[derive(Debug, Clone)]
pub struct PhImage {
    /// Title of the output image, `pH_` followed by the source title
    pub title: String,
    pub width: usize,
    pub height: usize,
    pub data: Vec<f32>,
}

impl PhImage {
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }
}
