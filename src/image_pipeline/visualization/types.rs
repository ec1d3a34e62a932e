//! Visualization types

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::image_pipeline::conversion::PhImage;

/// LUT choice and pH display window applied to every output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizationSpec {
    pub lut_name: String,
    pub display_min: f64,
    pub display_max: f64,
}

impl Default for VisualizationSpec {
    fn default() -> Self {
        Self {
            lut_name: "Green Fire Blue".to_string(),
            display_min: 5.0,
            display_max: 7.0,
        }
    }
}

/// Interleaved 8-bit RGB raster.
#[derive(Debug, Clone)]
pub struct RgbImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl RgbImage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 3],
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Writes one pixel; coordinates outside the raster are ignored.
    pub fn put_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = (y * self.width + x) * 3;
        self.data[i..i + 3].copy_from_slice(&rgb);
    }

    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, rgb: [u8; 3]) {
        for yy in y..y.saturating_add(h).min(self.height) {
            for xx in x..x.saturating_add(w).min(self.width) {
                self.put_pixel(xx, yy, rgb);
            }
        }
    }
}

/// A pH map ready for persistence.
#[derive(Debug, Clone)]
pub struct RenderedImage {
    pub ph: PhImage,
    pub lut_name: String,
    pub display_min: f64,
    pub display_max: f64,
    /// Calibration bar labels, top (max) to bottom (min)
    pub bar_labels: Vec<String>,
    /// LUT-coloured rendering with the calibration bar drawn in
    pub preview: Option<RgbImage>,
}

impl RenderedImage {
    /// ImageJ-style `key=value` block stored in the TIFF description tag.
    pub fn description(&self) -> String {
        let mut text = String::from("ImageJ=1.54f\n");
        let _ = writeln!(text, "min={}", self.display_min);
        let _ = writeln!(text, "max={}", self.display_max);
        let _ = writeln!(text, "unit=pH");
        let _ = writeln!(text, "lut={}", self.lut_name);
        let _ = writeln!(text, "calibration_bar={}", self.bar_labels.join(","));
        let _ = writeln!(text, "title={}", self.ph.title);
        text
    }
}
