//! TIFF image types

use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::image_pipeline::common::error::{ConversionError, Result};

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    #[default]
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - fast level (good speed/size balance)
    DeflateFast,
    /// Deflate compression - balanced
    DeflateBalanced,
    /// Deflate compression - best compression (slower)
    DeflateBest,
}

/// Decoded input image, samples widened to `f32`
#[derive(Debug, Clone)]
pub struct RatioImage {
    /// File name the image was opened from
    pub title: String,
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Samples per pixel
    pub channels: usize,
    /// Bits per stored sample (8, 16, 32 or 64)
    pub bits_per_sample: u32,
    /// Interleaved samples, row-major
    pub data: Vec<f32>,
}

impl RatioImage {
    /// Bits per pixel across all channels; an 8-bit RGB image reports 24.
    pub fn bit_depth(&self) -> u32 {
        self.bits_per_sample * self.channels as u32
    }

    /// Accepts only single-channel 32-bit images; `path` names the image
    /// in the error.
    pub fn ensure_ratio_format(&self, path: &Path) -> Result<()> {
        if self.channels == 1 && self.bits_per_sample == 32 {
            return Ok(());
        }
        Err(ConversionError::ValidationError {
            path: path.display().to_string(),
            bit_depth: self.bit_depth(),
            channels: self.channels,
        })
    }

    /// Arithmetic mean of every finite sample, `None` when there is none.
    pub fn mean_of_finite(&self) -> Option<f64> {
        let (sum, count) = self
            .data
            .iter()
            .filter(|v| v.is_finite())
            .fold((0.0f64, 0usize), |(sum, count), &v| (sum + v as f64, count + 1));

        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }
}
