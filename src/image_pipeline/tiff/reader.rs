use std::path::Path;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::tiff::types::RatioImage;

pub trait ImageReader {
    fn read_image(&self, data: &[u8], title: &str) -> Result<RatioImage>;

    /// Reads `path` from disk and decodes it, titled by its file name.
    fn open_image(&self, path: &Path) -> Result<RatioImage> {
        let data = std::fs::read(path).map_err(|e| {
            ConversionError::InputReadError(format!("{}: {}", path.display(), e))
        })?;
        let title = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.read_image(&data, &title)
    }
}
