//! Calibration configuration types

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::image_pipeline::common::error::ConversionError;

/// Source of the calibration bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CalibrationMode {
    /// Bounds typed in by the user
    #[default]
    Manual,
    /// Bounds taken from the mean ratio of two reference images
    FromImages,
}

impl FromStr for CalibrationMode {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manual" => Ok(CalibrationMode::Manual),
            "images" | "from-images" | "from_images" | "from calibration images" => {
                Ok(CalibrationMode::FromImages)
            }
            other => Err(ConversionError::ConfigError(format!(
                "invalid calibration mode: '{}'",
                other
            ))),
        }
    }
}

impl TryFrom<String> for CalibrationMode {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CalibrationMode> for String {
    fn from(mode: CalibrationMode) -> Self {
        mode.to_string()
    }
}

impl fmt::Display for CalibrationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalibrationMode::Manual => write!(f, "manual"),
            CalibrationMode::FromImages => write!(f, "from-images"),
        }
    }
}

/// Everything the resolver may need; which fields are required depends on the mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationSettings {
    pub mode: CalibrationMode,
    pub lower_ratio: Option<f64>,
    pub upper_ratio: Option<f64>,
    pub lower_image: Option<PathBuf>,
    pub upper_image: Option<PathBuf>,
}

impl CalibrationSettings {
    pub fn manual(lower: f64, upper: f64) -> Self {
        Self {
            mode: CalibrationMode::Manual,
            lower_ratio: Some(lower),
            upper_ratio: Some(upper),
            ..Self::default()
        }
    }

    pub fn from_images(lower: impl Into<PathBuf>, upper: impl Into<PathBuf>) -> Self {
        Self {
            mode: CalibrationMode::FromImages,
            lower_image: Some(lower.into()),
            upper_image: Some(upper.into()),
            ..Self::default()
        }
    }
}
