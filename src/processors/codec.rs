// webpify/src/processors/codec.rs
use crate::core::{OutputFormat, Result};
use image::DynamicImage;
use std::io::Cursor;

/// Decodes an encoded image and re-encodes it in a fixed target format.
pub trait Codec: Send + Sync {
    /// Suffix of the produced files, without the dot.
    fn suffix(&self) -> &str;

    fn convert(&self, data: &[u8]) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone, Copy)]
pub struct ImageCodec {
    format: OutputFormat,
}

impl ImageCodec {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn webp() -> Self {
        Self::new(OutputFormat::WebP)
    }

    // WebP and JPEG encoders only take 8-bit buffers; JPEG has no alpha.
    fn prepare(&self, image: DynamicImage) -> DynamicImage {
        match self.format {
            OutputFormat::Png => image,
            OutputFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()),
            OutputFormat::WebP if image.color().has_alpha() => {
                DynamicImage::ImageRgba8(image.to_rgba8())
            }
            OutputFormat::WebP => DynamicImage::ImageRgb8(image.to_rgb8()),
        }
    }
}

impl Default for ImageCodec {
    fn default() -> Self {
        Self::webp()
    }
}

impl Codec for ImageCodec {
    fn suffix(&self) -> &str {
        self.format.suffix()
    }

    fn convert(&self, data: &[u8]) -> Result<Vec<u8>> {
        let image = image::load_from_memory(data)?;
        log::debug!(
            "Decoded {}x{} image ({:?})",
            image.width(),
            image.height(),
            image.color()
        );

        let image = self.prepare(image);
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, self.format.image_format())?;

        Ok(buffer.into_inner())
    }
}
