//! Run configuration types

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::image_pipeline::calibration::CalibrationSettings;
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::conversion::PolynomialCoefficients;
use crate::image_pipeline::tiff::TiffCompression;
use crate::image_pipeline::visualization::{CalibrationBarOptions, VisualizationSpec};

/// What to do when an output file cannot be written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PersistPolicy {
    /// Log the failure, count it and move on to the next file
    #[default]
    Continue,
    /// Stop the batch and return the error
    Abort,
}

/// Configuration for a ratio to pH batch run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// File name suffixes to select, matched case-insensitively
    pub extensions: Vec<String>,
    pub calibration: CalibrationSettings,
    pub coefficients: PolynomialCoefficients,
    pub visualization: VisualizationSpec,
    pub calibration_bar: CalibrationBarOptions,
    pub persist_policy: PersistPolicy,
    pub compression: TiffCompression,
    /// Whether to store the LUT-coloured preview as a second TIFF page
    pub embed_preview: bool,
    /// Extra ImageJ `.lut` files to add to the catalog
    pub lut_dir: Option<PathBuf>,
}

impl RunConfig {
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::default()
    }
}

/// Builder for RunConfig
#[derive(Debug, Default, Clone)]
pub struct RunConfigBuilder {
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    extensions: Option<Vec<String>>,
    calibration: Option<CalibrationSettings>,
    coefficients: Option<PolynomialCoefficients>,
    visualization: Option<VisualizationSpec>,
    calibration_bar: Option<CalibrationBarOptions>,
    persist_policy: Option<PersistPolicy>,
    compression: Option<TiffCompression>,
    embed_preview: Option<bool>,
    lut_dir: Option<PathBuf>,
}

impl RunConfigBuilder {
    pub fn input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_dir = Some(dir.into());
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Accepts a comma-separated list, e.g. `"tif,tiff"`. An empty filter
    /// selects every file.
    pub fn extensions(mut self, filter: &str) -> Self {
        let mut list: Vec<String> = filter
            .split(',')
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .collect();
        if list.is_empty() {
            list.push(String::new());
        }
        self.extensions = Some(list);
        self
    }

    pub fn calibration(mut self, settings: CalibrationSettings) -> Self {
        self.calibration = Some(settings);
        self
    }

    pub fn coefficients(mut self, coefficients: PolynomialCoefficients) -> Self {
        self.coefficients = Some(coefficients);
        self
    }

    pub fn visualization(mut self, spec: VisualizationSpec) -> Self {
        self.visualization = Some(spec);
        self
    }

    pub fn calibration_bar(mut self, options: CalibrationBarOptions) -> Self {
        self.calibration_bar = Some(options);
        self
    }

    pub fn persist_policy(mut self, policy: PersistPolicy) -> Self {
        self.persist_policy = Some(policy);
        self
    }

    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn embed_preview(mut self, enable: bool) -> Self {
        self.embed_preview = Some(enable);
        self
    }

    pub fn lut_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.lut_dir = dir;
        self
    }

    pub fn build(self) -> Result<RunConfig> {
        let input_dir = self
            .input_dir
            .ok_or_else(|| ConversionError::ConfigError("input directory is required".to_string()))?;
        let output_dir = self
            .output_dir
            .ok_or_else(|| ConversionError::ConfigError("output directory is required".to_string()))?;

        let visualization = self.visualization.unwrap_or_default();
        if !(visualization.display_min < visualization.display_max) {
            return Err(ConversionError::ConfigError(format!(
                "pH display range is empty: min={} max={}",
                visualization.display_min, visualization.display_max
            )));
        }

        let calibration_bar = self.calibration_bar.unwrap_or_default();
        if calibration_bar.number == 0 {
            return Err(ConversionError::ConfigError(
                "calibration bar needs at least one label".to_string(),
            ));
        }

        Ok(RunConfig {
            input_dir,
            output_dir,
            extensions: self.extensions.unwrap_or_else(|| vec!["tif".to_string()]),
            calibration: self.calibration.unwrap_or_default(),
            coefficients: self.coefficients.unwrap_or_default(),
            visualization,
            calibration_bar,
            persist_policy: self.persist_policy.unwrap_or_default(),
            compression: self.compression.unwrap_or_default(),
            embed_preview: self.embed_preview.unwrap_or(true),
            lut_dir: self.lut_dir,
        })
    }
}
