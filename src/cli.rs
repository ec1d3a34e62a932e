//! Command-line arguments.
//!
//! Flags override the matching values of an optional JSON config file.

use std::path::PathBuf;

use clap::Parser;

use crate::image_pipeline::{
    ConfigFile, PersistPolicy, Result, TiffCompression,
};

#[derive(Parser, Debug, Default)]
#[command(
    author,
    version,
    about = "Convert 465/405 ratiometric images to absolute pH maps",
    long_about = "Normalizes every ratio image in a folder against two calibration \
        ratios (entered manually or measured as the mean of two reference images), \
        maps the result through a cubic polynomial to pH and saves 32-bit TIFFs \
        with a LUT preview and calibration bar."
)]
pub struct Cli {
    #[arg(short, long, help = "Folder with the ratio images (searched recursively)")]
    pub input: Option<PathBuf>,

    #[arg(short, long, help = "Folder to save the pH images to")]
    pub output: Option<PathBuf>,

    #[arg(
        short,
        long,
        help = "File name ending(s) to select, comma separated; empty selects all [default: tif]"
    )]
    pub extension: Option<String>,

    #[arg(
        short,
        long,
        help = "Calibration mode: 'manual' or 'from-images' [default: manual]"
    )]
    pub mode: Option<String>,

    #[arg(long, allow_negative_numbers = true, help = "Lower calibration ratio (lower pH)")]
    pub lower_ratio: Option<f64>,

    #[arg(long, allow_negative_numbers = true, help = "Upper calibration ratio (upper pH)")]
    pub upper_ratio: Option<f64>,

    #[arg(long, help = "Lower calibration image (lower pH)")]
    pub lower_image: Option<PathBuf>,

    #[arg(long, help = "Upper calibration image (upper pH)")]
    pub upper_image: Option<PathBuf>,

    #[arg(long, allow_negative_numbers = true, help = "Coefficient for x³ [default: 3.4347]")]
    pub b3: Option<f64>,

    #[arg(long, allow_negative_numbers = true, help = "Coefficient for x² [default: -5.7843]")]
    pub b2: Option<f64>,

    #[arg(long, allow_negative_numbers = true, help = "Coefficient for x [default: 4.2768]")]
    pub b1: Option<f64>,

    #[arg(long, allow_negative_numbers = true, help = "Constant term [default: 5.0497]")]
    pub b0: Option<f64>,

    #[arg(short, long, help = "LUT for visualization [default: Green Fire Blue]")]
    pub lut: Option<String>,

    #[arg(long, allow_negative_numbers = true, help = "pH display range minimum [default: 5.0]")]
    pub ph_min: Option<f64>,

    #[arg(long, allow_negative_numbers = true, help = "pH display range maximum [default: 7.0]")]
    pub ph_max: Option<f64>,

    #[arg(long, help = "Folder of ImageJ .lut files to add to the LUT catalog")]
    pub lut_dir: Option<PathBuf>,

    #[arg(long, value_enum, help = "Behaviour when an output file cannot be written")]
    pub on_write_error: Option<PersistPolicy>,

    #[arg(long, value_enum, help = "TIFF compression for the outputs")]
    pub compression: Option<TiffCompression>,

    #[arg(long, help = "Do not embed the LUT-coloured preview page")]
    pub no_preview: bool,

    #[arg(short, long, help = "JSON configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Print the available LUT names and exit")]
    pub list_luts: bool,
}

impl Cli {
    /// Layers the flags that were given over `file`.
    pub fn apply(&self, mut file: ConfigFile) -> Result<ConfigFile> {
        if let Some(dir) = &self.input {
            file.input_dir = Some(dir.clone());
        }
        if let Some(dir) = &self.output {
            file.output_dir = Some(dir.clone());
        }
        if let Some(filter) = &self.extension {
            file.extensions = Some(filter.clone());
        }

        let mut calibration = file.calibration.take().unwrap_or_default();
        if let Some(mode) = &self.mode {
            calibration.mode = mode.parse()?;
        }
        if self.lower_ratio.is_some() {
            calibration.lower_ratio = self.lower_ratio;
        }
        if self.upper_ratio.is_some() {
            calibration.upper_ratio = self.upper_ratio;
        }
        if self.lower_image.is_some() {
            calibration.lower_image = self.lower_image.clone();
        }
        if self.upper_image.is_some() {
            calibration.upper_image = self.upper_image.clone();
        }
        file.calibration = Some(calibration);

        let mut coefficients = file.coefficients.take().unwrap_or_default();
        coefficients.b3 = self.b3.unwrap_or(coefficients.b3);
        coefficients.b2 = self.b2.unwrap_or(coefficients.b2);
        coefficients.b1 = self.b1.unwrap_or(coefficients.b1);
        coefficients.b0 = self.b0.unwrap_or(coefficients.b0);
        file.coefficients = Some(coefficients);

        let mut visualization = file.visualization.take().unwrap_or_default();
        if let Some(name) = &self.lut {
            visualization.lut_name = name.clone();
        }
        visualization.display_min = self.ph_min.unwrap_or(visualization.display_min);
        visualization.display_max = self.ph_max.unwrap_or(visualization.display_max);
        file.visualization = Some(visualization);

        if self.lut_dir.is_some() {
            file.lut_dir = self.lut_dir.clone();
        }
        if self.on_write_error.is_some() {
            file.persist_policy = self.on_write_error;
        }
        if self.compression.is_some() {
            file.compression = self.compression;
        }
        if self.no_preview {
            file.embed_preview = Some(false);
        }
        Ok(file)
    }
}
