//! Ratio image reader backed by the `tiff` crate.
//!
//! Only the first page of a file is decoded. Integer and float samples are
//! widened to `f32` while the stored bit depth is kept on the image, so the
//! caller can decide whether the source was a genuine 32-bit ratio image.

use std::io::Cursor;

use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult, Limits};
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::tiff::reader::ImageReader;
use crate::image_pipeline::tiff::types::RatioImage;

pub struct TiffImageReader;

fn decode_err(e: tiff::TiffError) -> ConversionError {
    ConversionError::DecodeError(e.to_string())
}

impl ImageReader for TiffImageReader {
    fn read_image(&self, data: &[u8], title: &str) -> Result<RatioImage> {
        debug!("Decoding TIFF image {}, {} bytes", title, data.len());

        let mut decoder = Decoder::new(Cursor::new(data))
            .map_err(decode_err)?
            .with_limits(Limits::unlimited());

        let (width, height) = decoder.dimensions().map_err(decode_err)?;
        let (channels, bits_per_sample) = match decoder.colortype().map_err(decode_err)? {
            ColorType::Gray(bits) => (1, bits),
            ColorType::GrayA(bits) => (2, bits),
            ColorType::RGB(bits) => (3, bits),
            ColorType::RGBA(bits) => (4, bits),
            other => {
                return Err(ConversionError::DecodeError(format!(
                    "{}: unsupported color type {:?}",
                    title, other
                )));
            }
        };

        let samples: Vec<f32> = match decoder.read_image().map_err(decode_err)? {
            DecodingResult::U8(buf) => buf.into_iter().map(f32::from).collect(),
            DecodingResult::U16(buf) => buf.into_iter().map(f32::from).collect(),
            DecodingResult::U32(buf) => buf.into_iter().map(|v| v as f32).collect(),
            DecodingResult::F32(buf) => buf,
            DecodingResult::F64(buf) => buf.into_iter().map(|v| v as f32).collect(),
            _ => {
                return Err(ConversionError::DecodeError(format!(
                    "{}: unsupported sample format",
                    title
                )));
            }
        };

        let (width, height) = (width as usize, height as usize);
        if samples.len() != width * height * channels {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        debug!(
            "Decoded image: {}x{}, {} channel(s), {} bits per sample",
            width, height, channels, bits_per_sample
        );

        Ok(RatioImage {
            title: title.to_string(),
            width,
            height,
            channels,
            bits_per_sample: u32::from(bits_per_sample),
            data: samples,
        })
    }
}
