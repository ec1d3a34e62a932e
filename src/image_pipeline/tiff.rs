//! TIFF reading and writing module
//!
//! Decodes ratio images into single-precision sample buffers and encodes
//! rendered pH maps as 32-bit float TIFFs with various compression options.

mod reader;
mod writer;
mod tiff_image_reader;
mod standard_tiff_writer;
pub mod types;

#[cfg(test)]
mod tests;

pub use reader::ImageReader;
pub use writer::ImageWriter;
pub use tiff_image_reader::TiffImageReader;
pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{RatioImage, TiffCompression};
