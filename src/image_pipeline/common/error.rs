use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode TIFF image: {0}")]
    DecodeError(String),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("Image is not single-channel 32-bit: {path} ({bit_depth}-bit, {channels} channel(s))")]
    ValidationError {
        path: String,
        bit_depth: u32,
        channels: usize,
    },

    #[error("Calibration image has no finite samples: {0}")]
    EmptyCalibrationImage(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
