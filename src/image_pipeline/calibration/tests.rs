use std::cell::RefCell;
use std::path::Path;

use approx::assert_relative_eq;

use crate::image_pipeline::calibration::{CalibrationMode, CalibrationResolver, CalibrationSettings};
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::testing::{ratio_image, rgba8_bytes, write_file};
use crate::image_pipeline::tiff::{ImageReader, RatioImage, TiffImageReader};

/// Serves images by file name without touching the disk.
struct MockReader {
    images: Vec<RatioImage>,
    opened: RefCell<Vec<String>>,
}

impl MockReader {
    fn new(images: Vec<RatioImage>) -> Self {
        Self {
            images,
            opened: RefCell::new(Vec::new()),
        }
    }
}

impl ImageReader for MockReader {
    fn read_image(&self, _data: &[u8], title: &str) -> Result<RatioImage> {
        self.images
            .iter()
            .find(|i| i.title == title)
            .cloned()
            .ok_or_else(|| ConversionError::DecodeError(format!("Mock decode error: {}", title)))
    }

    fn open_image(&self, path: &Path) -> Result<RatioImage> {
        let title = path.file_name().unwrap().to_string_lossy().into_owned();
        self.opened.borrow_mut().push(title.clone());
        self.read_image(&[], &title)
    }
}

fn sixteen_bit(title: &str) -> RatioImage {
    RatioImage {
        bits_per_sample: 16,
        ..ratio_image(title, 2, 1, vec![100.0, 200.0])
    }
}

#[test]
fn test_manual_bounds() {
    let reader = MockReader::new(Vec::new());
    let bounds = CalibrationResolver::new(&reader)
        .resolve(&CalibrationSettings::manual(0.42, 1.37))
        .unwrap();

    assert_eq!(bounds.lower(), 0.42);
    assert_eq!(bounds.upper(), 1.37);
    assert!(reader.opened.borrow().is_empty());
}

#[test]
fn test_manual_requires_both_values() {
    let reader = MockReader::new(Vec::new());
    let settings = CalibrationSettings {
        mode: CalibrationMode::Manual,
        lower_ratio: Some(0.5),
        ..CalibrationSettings::default()
    };

    let result = CalibrationResolver::new(&reader).resolve(&settings);
    match result {
        Err(ConversionError::ConfigError(msg)) => assert!(msg.contains("missing calibration values")),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn test_manual_identical_values_rejected() {
    let reader = MockReader::new(Vec::new());
    let result = CalibrationResolver::new(&reader).resolve(&CalibrationSettings::manual(1.0, 1.0));
    assert!(matches!(result, Err(ConversionError::ConfigError(_))));
}

#[test]
fn test_images_require_both_paths() {
    let reader = MockReader::new(Vec::new());
    let settings = CalibrationSettings {
        mode: CalibrationMode::FromImages,
        upper_image: Some("upper.tif".into()),
        // manual values are ignored in image mode
        lower_ratio: Some(0.1),
        upper_ratio: Some(0.9),
        ..CalibrationSettings::default()
    };

    let result = CalibrationResolver::new(&reader).resolve(&settings);
    assert!(matches!(result, Err(ConversionError::ConfigError(_))));
    assert!(reader.opened.borrow().is_empty());
}

#[test]
fn test_bounds_are_means_of_finite_samples() {
    let reader = MockReader::new(vec![
        ratio_image("low.tif", 2, 2, vec![0.4, 0.6, f32::NAN, 0.5]),
        ratio_image("high.tif", 3, 1, vec![1.5, 1.25, 1.75]),
    ]);

    let bounds = CalibrationResolver::new(&reader)
        .resolve(&CalibrationSettings::from_images("cal/low.tif", "cal/high.tif"))
        .unwrap();

    assert_relative_eq!(bounds.lower(), 0.5, epsilon = 1e-6);
    assert_relative_eq!(bounds.upper(), 1.5, epsilon = 1e-6);
    assert_eq!(*reader.opened.borrow(), vec!["low.tif", "high.tif"]);
}

#[test]
fn test_non_32_bit_reference_is_fatal() {
    let reader = MockReader::new(vec![
        sixteen_bit("low.tif"),
        ratio_image("high.tif", 1, 1, vec![1.5]),
    ]);

    let result = CalibrationResolver::new(&reader)
        .resolve(&CalibrationSettings::from_images("low.tif", "high.tif"));

    assert!(matches!(
        result,
        Err(ConversionError::ValidationError {
            bit_depth: 16,
            channels: 1,
            ..
        })
    ));
    // stops at the first bad reference
    assert_eq!(*reader.opened.borrow(), vec!["low.tif"]);
}

#[test]
fn test_multi_channel_reference_totalling_32_bits_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let low = dir.path().join("low_rgba.tif");
    let high = dir.path().join("high_rgba.tif");
    write_file(&low, &rgba8_bytes(1, 1, &[10, 10, 10, 255]));
    write_file(&high, &rgba8_bytes(1, 1, &[20, 20, 20, 255]));

    let result = CalibrationResolver::new(&TiffImageReader)
        .resolve(&CalibrationSettings::from_images(&low, &high));

    assert!(matches!(
        result,
        Err(ConversionError::ValidationError {
            bit_depth: 32,
            channels: 4,
            ..
        })
    ));
}

#[test]
fn test_gray_alpha_reference_is_fatal() {
    let gray_alpha = RatioImage {
        title: "low.tif".to_string(),
        width: 1,
        height: 1,
        channels: 2,
        bits_per_sample: 16,
        data: vec![100.0, 65535.0],
    };
    let reader = MockReader::new(vec![gray_alpha, ratio_image("high.tif", 1, 1, vec![1.5])]);

    let result = CalibrationResolver::new(&reader)
        .resolve(&CalibrationSettings::from_images("low.tif", "high.tif"));

    assert!(matches!(
        result,
        Err(ConversionError::ValidationError { channels: 2, .. })
    ));
}

#[test]
fn test_unreadable_reference_is_fatal() {
    let reader = MockReader::new(vec![ratio_image("low.tif", 1, 1, vec![0.5])]);
    let result = CalibrationResolver::new(&reader)
        .resolve(&CalibrationSettings::from_images("low.tif", "missing.tif"));
    assert!(matches!(result, Err(ConversionError::DecodeError(_))));
}

#[test]
fn test_reference_without_finite_samples() {
    let reader = MockReader::new(vec![
        ratio_image("low.tif", 2, 1, vec![f32::NAN, f32::NAN]),
        ratio_image("high.tif", 1, 1, vec![1.5]),
    ]);
    let result = CalibrationResolver::new(&reader)
        .resolve(&CalibrationSettings::from_images("low.tif", "high.tif"));
    assert!(matches!(result, Err(ConversionError::EmptyCalibrationImage(_))));
}

#[test]
fn test_mode_parsing() {
    assert_eq!("Manual".parse::<CalibrationMode>().unwrap(), CalibrationMode::Manual);
    assert_eq!(
        "From calibration images".parse::<CalibrationMode>().unwrap(),
        CalibrationMode::FromImages
    );
    assert_eq!("from-images".parse::<CalibrationMode>().unwrap(), CalibrationMode::FromImages);

    match "histogram".parse::<CalibrationMode>() {
        Err(ConversionError::ConfigError(msg)) => assert!(msg.contains("invalid calibration mode")),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn test_mode_from_json() {
    let settings: CalibrationSettings =
        serde_json::from_str(r#"{ "mode": "images", "lower_image": "a.tif", "upper_image": "b.tif" }"#)
            .unwrap();
    assert_eq!(settings.mode, CalibrationMode::FromImages);

    let bad = serde_json::from_str::<CalibrationSettings>(r#"{ "mode": "guess" }"#);
    assert!(bad.is_err());
}
