//! Shared helpers for unit tests.

use std::io::{self, Cursor, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tiff::encoder::{TiffEncoder, colortype};
use tracing_subscriber::fmt::MakeWriter;

use crate::image_pipeline::tiff::RatioImage;

/// Single-channel 32-bit image built from `data`, row-major.
pub(crate) fn ratio_image(title: &str, width: usize, height: usize, data: Vec<f32>) -> RatioImage {
    assert_eq!(data.len(), width * height);
    RatioImage {
        title: title.to_string(),
        width,
        height,
        channels: 1,
        bits_per_sample: 32,
        data,
    }
}

pub(crate) fn gray32f_bytes(width: u32, height: u32, data: &[f32]) -> Vec<u8> {
    let mut buffer = Vec::new();
    TiffEncoder::new(Cursor::new(&mut buffer))
        .unwrap()
        .write_image::<colortype::Gray32Float>(width, height, data)
        .unwrap();
    buffer
}

pub(crate) fn gray16_bytes(width: u32, height: u32, data: &[u16]) -> Vec<u8> {
    let mut buffer = Vec::new();
    TiffEncoder::new(Cursor::new(&mut buffer))
        .unwrap()
        .write_image::<colortype::Gray16>(width, height, data)
        .unwrap();
    buffer
}

pub(crate) fn rgb8_bytes(width: u32, height: u32, data: &[u8]) -> Vec<u8> {
    let mut buffer = Vec::new();
    TiffEncoder::new(Cursor::new(&mut buffer))
        .unwrap()
        .write_image::<colortype::RGB8>(width, height, data)
        .unwrap();
    buffer
}

pub(crate) fn rgba8_bytes(width: u32, height: u32, data: &[u8]) -> Vec<u8> {
    let mut buffer = Vec::new();
    TiffEncoder::new(Cursor::new(&mut buffer))
        .unwrap()
        .write_image::<colortype::RGBA8>(width, height, data)
        .unwrap();
    buffer
}

pub(crate) fn write_file(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, bytes).unwrap();
}

/// Shared sink for formatted log output.
#[derive(Clone, Default)]
pub(crate) struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Runs `f` under a thread-local subscriber and returns its result with
/// every log line emitted meanwhile.
pub(crate) fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let text = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (result, text.lines().map(str::to_string).collect())
}
