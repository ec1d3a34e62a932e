//! Image processing pipeline module
//!
//! This module converts ratiometric images to absolute pH maps, with separate
//! modules for TIFF I/O, calibration, per-pixel conversion, visualization
//! and batch orchestration.

pub mod batch;
pub mod calibration;
pub mod common;
pub mod config;
pub mod conversion;
pub mod tiff;
pub mod visualization;

#[cfg(test)]
pub(crate) mod testing;

pub use common::{
    ConversionError,
    Result,
};

pub use self::tiff::{
    ImageReader,
    ImageWriter,
    RatioImage,
    StandardTiffWriter,
    TiffCompression,
    TiffImageReader,
};

pub use conversion::{
    CalibrationBounds,
    PhImage,
    PolynomialCoefficients,
};

pub use calibration::{
    CalibrationMode,
    CalibrationResolver,
    CalibrationSettings,
};

pub use config::{
    ConfigFile,
    PersistPolicy,
    RunConfig,
    RunConfigBuilder,
};

pub use visualization::{
    BuiltinLuts,
    CalibrationBarOptions,
    Lut,
    LutCatalog,
    VisualizationSpec,
};

pub use batch::{
    BatchSummary,
    LogProgress,
    PhPipeline,
    ProgressSink,
    RedrawProgress,
};
