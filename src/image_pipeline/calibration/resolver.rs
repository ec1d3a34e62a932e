use std::path::Path;

use tracing::{error, info, instrument};

use crate::image_pipeline::calibration::types::{CalibrationMode, CalibrationSettings};
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::conversion::CalibrationBounds;
use crate::image_pipeline::tiff::ImageReader;

/// Turns [`CalibrationSettings`] into [`CalibrationBounds`].
///
/// Runs once before any batch file is touched; every failure here is fatal.
pub struct CalibrationResolver<'a, R: ImageReader> {
    reader: &'a R,
}

impl<'a, R: ImageReader> CalibrationResolver<'a, R> {
    pub fn new(reader: &'a R) -> Self {
        Self { reader }
    }

    #[instrument(skip(self, settings), fields(mode = %settings.mode))]
    pub fn resolve(&self, settings: &CalibrationSettings) -> Result<CalibrationBounds> {
        let (lower, upper) = match settings.mode {
            CalibrationMode::Manual => {
                let (Some(lower), Some(upper)) = (settings.lower_ratio, settings.upper_ratio) else {
                    error!("Both manual calibration values must be entered");
                    return Err(ConversionError::ConfigError(
                        "missing calibration values: manual mode requires both lower and upper ratios"
                            .to_string(),
                    ));
                };
                (lower, upper)
            }
            CalibrationMode::FromImages => {
                let (Some(lower_path), Some(upper_path)) =
                    (settings.lower_image.as_deref(), settings.upper_image.as_deref())
                else {
                    error!("Both calibration images must be provided");
                    return Err(ConversionError::ConfigError(
                        "missing calibration values: image calibration requires both lower and upper images"
                            .to_string(),
                    ));
                };
                let lower = self.mean_ratio(lower_path)?;
                let upper = self.mean_ratio(upper_path)?;
                info!("Calibration image (lower pH) -> mean ratio: {:.6}", lower);
                info!("Calibration image (upper pH) -> mean ratio: {:.6}", upper);
                (lower, upper)
            }
        };

        let bounds = CalibrationBounds::new(lower, upper).inspect_err(|e| error!("{}", e))?;
        info!(lower = bounds.lower(), upper = bounds.upper(), "Calibration resolved");
        Ok(bounds)
    }

    /// Mean of the finite samples of a single-channel 32-bit reference image.
    fn mean_ratio(&self, path: &Path) -> Result<f64> {
        let image = self.reader.open_image(path).inspect_err(|e| {
            error!("Cannot open calibration image {}: {}", path.display(), e);
        })?;

        image.ensure_ratio_format(path).inspect_err(|_| {
            error!(
                "Calibration image is not a single-channel 32-bit image: {} ({}-bit, {} channel(s))",
                path.display(),
                image.bit_depth(),
                image.channels
            );
        })?;

        image.mean_of_finite().ok_or_else(|| {
            error!("Calibration image has no finite samples: {}", path.display());
            ConversionError::EmptyCalibrationImage(path.display().to_string())
        })
    }
}
