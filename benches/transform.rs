use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use ratio_ph_rs::image_pipeline::{
    CalibrationBarOptions, CalibrationBounds, ImageWriter, Lut, PolynomialCoefficients,
    RatioImage, StandardTiffWriter, TiffCompression, VisualizationSpec,
};
use ratio_ph_rs::image_pipeline::conversion::transform;
use ratio_ph_rs::image_pipeline::visualization::render;
use std::io::Cursor;

fn generate_mock_ratio_image(width: usize, height: usize) -> RatioImage {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            // sprinkle some no-data pixels in
            let value = if (x + y) % 97 == 0 {
                0.0
            } else {
                0.3 + ((x * 7 + y * 3) % 256) as f32 / 200.0
            };
            data.push(value);
        }
    }
    RatioImage {
        title: "bench.tif".to_string(),
        width,
        height,
        channels: 1,
        bits_per_sample: 32,
        data,
    }
}

fn benchmark_transform_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform_by_size");
    let bounds = CalibrationBounds::new(0.4, 1.6).unwrap();
    let coeffs = PolynomialCoefficients::default();

    let sizes = vec![
        (100, 100, "100x100"),
        (500, 500, "500x500"),
        (2048, 2048, "2048x2048"),
    ];

    for (width, height, label) in sizes {
        let image = generate_mock_ratio_image(width, height);

        group.bench_with_input(
            BenchmarkId::from_parameter(label),
            &image,
            |b, image| {
                b.iter(|| transform(black_box(image), &bounds, &coeffs));
            },
        );
    }

    group.finish();
}

fn benchmark_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let bounds = CalibrationBounds::new(0.4, 1.6).unwrap();
    let image = generate_mock_ratio_image(1024, 1024);
    let ph = transform(&image, &bounds, &PolynomialCoefficients::default());
    let lut = Lut::green_fire_blue();
    let spec = VisualizationSpec::default();
    let bar = CalibrationBarOptions::default();

    group.bench_function("with_preview", |b| {
        b.iter(|| render(black_box(ph.clone()), &lut, &spec, &bar, true));
    });

    group.bench_function("without_preview", |b| {
        b.iter(|| render(black_box(ph.clone()), &lut, &spec, &bar, false));
    });

    group.finish();
}

fn benchmark_compression_methods(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression_methods");
    let bounds = CalibrationBounds::new(0.4, 1.6).unwrap();
    let image = generate_mock_ratio_image(500, 500);
    let ph = transform(&image, &bounds, &PolynomialCoefficients::default());
    let rendered = render(
        ph,
        &Lut::green_fire_blue(),
        &VisualizationSpec::default(),
        &CalibrationBarOptions::default(),
        true,
    );

    let compressions = vec![
        (TiffCompression::None, "none"),
        (TiffCompression::Lzw, "lzw"),
        (TiffCompression::DeflateFast, "deflate_fast"),
        (TiffCompression::DeflateBest, "deflate_best"),
    ];

    for (compression, label) in compressions {
        group.bench_with_input(
            BenchmarkId::from_parameter(label),
            &rendered,
            |b, rendered| {
                b.iter(|| {
                    let mut output = Cursor::new(Vec::new());
                    let _ = StandardTiffWriter.write_tiff(black_box(rendered), &mut output, compression);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_transform_sizes,
    benchmark_render,
    benchmark_compression_methods
);
criterion_main!(benches);
