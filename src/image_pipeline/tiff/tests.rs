use std::io::Cursor;

use approx::assert_relative_eq;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;

use crate::image_pipeline::common::error::ConversionError;
use crate::image_pipeline::conversion::PhImage;
use crate::image_pipeline::testing::{gray16_bytes, gray32f_bytes, ratio_image, rgb8_bytes, write_file};
use crate::image_pipeline::tiff::{
    ImageReader, ImageWriter, StandardTiffWriter, TiffCompression, TiffImageReader,
};
use crate::image_pipeline::visualization::types::{RenderedImage, RgbImage};

fn rendered(preview: bool) -> RenderedImage {
    RenderedImage {
        ph: PhImage {
            title: "pH_leaf.tif".to_string(),
            width: 3,
            height: 2,
            data: vec![5.0, 5.5, f32::NAN, 6.0, 6.5, 7.0],
        },
        lut_name: "Fire".to_string(),
        display_min: 5.0,
        display_max: 7.0,
        bar_labels: vec!["7.000".to_string(), "5.000".to_string()],
        preview: preview.then(|| RgbImage::new(3, 2)),
    }
}

#[test]
fn test_reads_float32_image() {
    let bytes = gray32f_bytes(2, 2, &[0.5, 1.0, f32::NAN, 0.0]);
    let image = TiffImageReader.read_image(&bytes, "ratio.tif").unwrap();

    assert_eq!(image.title, "ratio.tif");
    assert_eq!((image.width, image.height, image.channels), (2, 2, 1));
    assert_eq!(image.bit_depth(), 32);
    assert_eq!(image.data[0], 0.5);
    assert!(image.data[2].is_nan());
}

#[test]
fn test_reports_bit_depth_of_integer_images() {
    let gray = TiffImageReader
        .read_image(&gray16_bytes(2, 1, &[1, 65535]), "g16.tif")
        .unwrap();
    assert_eq!(gray.bit_depth(), 16);
    assert_eq!(gray.data, vec![1.0, 65535.0]);

    let rgb = TiffImageReader
        .read_image(&rgb8_bytes(1, 1, &[10, 20, 30]), "rgb.tif")
        .unwrap();
    assert_eq!(rgb.channels, 3);
    assert_eq!(rgb.bit_depth(), 24);
}

#[test]
fn test_garbage_is_decode_error() {
    let result = TiffImageReader.read_image(b"definitely not a tiff", "junk.tif");
    assert!(matches!(result, Err(ConversionError::DecodeError(_))));
}

#[test]
fn test_open_missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = TiffImageReader.open_image(&dir.path().join("missing.tif"));
    assert!(matches!(result, Err(ConversionError::InputReadError(_))));
}

#[test]
fn test_open_uses_file_name_as_title() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sub").join("Ratio_A.TIF");
    write_file(&path, &gray32f_bytes(1, 1, &[1.0]));

    let image = TiffImageReader.open_image(&path).unwrap();
    assert_eq!(image.title, "Ratio_A.TIF");
}

#[test]
fn test_mean_of_finite_skips_nan_and_infinity() {
    let image = ratio_image(
        "cal.tif",
        3,
        2,
        vec![1.0, 2.0, f32::NAN, 3.0, f32::INFINITY, 6.0],
    );
    assert_relative_eq!(image.mean_of_finite().unwrap(), 3.0);

    let empty = ratio_image("nan.tif", 2, 1, vec![f32::NAN, f32::NAN]);
    assert_eq!(empty.mean_of_finite(), None);
}

#[test]
fn test_writer_stores_float_page_and_metadata() {
    let mut out = Vec::new();
    StandardTiffWriter
        .write_tiff(&rendered(false), &mut out, TiffCompression::None)
        .unwrap();

    let mut decoder = Decoder::new(Cursor::new(&out)).unwrap();
    assert_eq!(decoder.dimensions().unwrap(), (3, 2));
    let description = decoder.get_tag_ascii_string(Tag::ImageDescription).unwrap();
    assert!(description.contains("min=5"));
    assert!(description.contains("max=7"));
    assert!(description.contains("lut=Fire"));
    assert!(description.contains("calibration_bar=7.000,5.000"));

    let DecodingResult::F32(data) = decoder.read_image().unwrap() else {
        panic!("expected 32-bit float samples");
    };
    assert_eq!(data[0], 5.0);
    assert!(data[2].is_nan());
    assert_eq!(data[5], 7.0);
    assert!(!decoder.more_images());
}

#[test]
fn test_writer_appends_preview_page() {
    let mut out = Vec::new();
    StandardTiffWriter
        .write_tiff(&rendered(true), &mut out, TiffCompression::DeflateFast)
        .unwrap();

    let mut decoder = Decoder::new(Cursor::new(&out)).unwrap();
    assert!(decoder.more_images());
    decoder.next_image().unwrap();
    assert_eq!(decoder.colortype().unwrap(), tiff::ColorType::RGB(8));

    // the float page still decodes through the reader
    let image = TiffImageReader.read_image(&out, "pH_leaf.tif").unwrap();
    assert_eq!(image.bit_depth(), 32);
}
