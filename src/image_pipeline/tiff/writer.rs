use std::io::Write;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::tiff::types::TiffCompression;
use crate::image_pipeline::visualization::types::RenderedImage;

pub trait ImageWriter {
    fn write_tiff(
        &self,
        image: &RenderedImage,
        output: &mut dyn Write,
        compression: TiffCompression,
    ) -> Result<()>;
}
