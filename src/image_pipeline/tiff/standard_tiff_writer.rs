use std::io::{Cursor, Write};

use tiff::encoder::{Compression, TiffEncoder, colortype, compression::DeflateLevel};
use tiff::tags::Tag;
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::tiff::types::TiffCompression;
use crate::image_pipeline::tiff::writer::ImageWriter;
use crate::image_pipeline::visualization::types::RenderedImage;

/// Writes the pH map as a 32-bit float page, followed by the RGB preview
/// page when one was rendered.
pub struct StandardTiffWriter;

fn encode_err(e: tiff::TiffError) -> ConversionError {
    ConversionError::EncodeError(e.to_string())
}

impl ImageWriter for StandardTiffWriter {
    fn write_tiff(
        &self,
        image: &RenderedImage,
        output: &mut dyn Write,
        compression: TiffCompression,
    ) -> Result<()> {
        let ph = &image.ph;
        debug!("Encoding TIFF image: {}x{}", ph.width, ph.height);

        let mut buffer = Vec::new();

        let compression = match compression {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
            TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
        };

        {
            let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
                .map_err(encode_err)?
                .with_compression(compression);

            let description = image.description();
            let mut page = encoder
                .new_image::<colortype::Gray32Float>(ph.width as u32, ph.height as u32)
                .map_err(encode_err)?;
            page.encoder()
                .write_tag(Tag::ImageDescription, description.as_str())
                .map_err(encode_err)?;
            page.write_data(&ph.data).map_err(encode_err)?;

            if let Some(preview) = &image.preview {
                encoder
                    .write_image::<colortype::RGB8>(
                        preview.width as u32,
                        preview.height as u32,
                        &preview.data,
                    )
                    .map_err(encode_err)?;
            }
        }

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete");
        Ok(())
    }
}
