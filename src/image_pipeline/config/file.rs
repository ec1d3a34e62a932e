use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::image_pipeline::calibration::CalibrationSettings;
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::config::types::{PersistPolicy, RunConfigBuilder};
use crate::image_pipeline::conversion::PolynomialCoefficients;
use crate::image_pipeline::tiff::TiffCompression;
use crate::image_pipeline::visualization::{CalibrationBarOptions, VisualizationSpec};

/// JSON run configuration; every field is optional.
///
/// ```json
/// {
///   "input_dir": "ratios",
///   "output_dir": "ph",
///   "extensions": "tif",
///   "calibration": { "mode": "manual", "lower_ratio": 0.4, "upper_ratio": 1.6 },
///   "coefficients": { "b3": 3.4347, "b2": -5.7843, "b1": 4.2768, "b0": 5.0497 },
///   "visualization": { "lut_name": "Fire", "display_min": 5.0, "display_max": 7.0 }
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub extensions: Option<String>,
    pub calibration: Option<CalibrationSettings>,
    pub coefficients: Option<PolynomialCoefficients>,
    pub visualization: Option<VisualizationSpec>,
    pub calibration_bar: Option<CalibrationBarOptions>,
    pub persist_policy: Option<PersistPolicy>,
    pub compression: Option<TiffCompression>,
    pub embed_preview: Option<bool>,
    pub lut_dir: Option<PathBuf>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ConversionError::ConfigError(format!("cannot read config {}: {}", path.display(), e))
        })?;
        let file = Self::parse(&text)
            .map_err(|e| ConversionError::ConfigError(format!("{}: {}", path.display(), e)))?;
        debug!("Loaded configuration from {}", path.display());
        Ok(file)
    }

    pub fn parse(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Seeds a builder with the values present in the file.
    pub fn into_builder(self) -> RunConfigBuilder {
        let mut builder = RunConfigBuilder::default().lut_dir(self.lut_dir);
        if let Some(dir) = self.input_dir {
            builder = builder.input_dir(dir);
        }
        if let Some(dir) = self.output_dir {
            builder = builder.output_dir(dir);
        }
        if let Some(filter) = self.extensions {
            builder = builder.extensions(&filter);
        }
        if let Some(calibration) = self.calibration {
            builder = builder.calibration(calibration);
        }
        if let Some(coefficients) = self.coefficients {
            builder = builder.coefficients(coefficients);
        }
        if let Some(visualization) = self.visualization {
            builder = builder.visualization(visualization);
        }
        if let Some(bar) = self.calibration_bar {
            builder = builder.calibration_bar(bar);
        }
        if let Some(policy) = self.persist_policy {
            builder = builder.persist_policy(policy);
        }
        if let Some(compression) = self.compression {
            builder = builder.compression(compression);
        }
        if let Some(enable) = self.embed_preview {
            builder = builder.embed_preview(enable);
        }
        builder
    }
}
