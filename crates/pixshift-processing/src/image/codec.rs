//! Decoding and encoding backed by the `image` crate.

use crate::error::CodecError;
use crate::traits::ImageCodec;
use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, GenericImageView, ImageReader};
use pixshift_core::ImageFormat;
use std::borrow::Cow;
use std::io::Cursor;

/// A decoded pixel buffer. Width and height are always non-zero.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    image: DynamicImage,
}

impl DecodedImage {
    pub fn new(image: DynamicImage) -> Result<Self, CodecError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(CodecError::Decode(format!(
                "image has empty dimensions {}x{}",
                width, height
            )));
        }
        Ok(Self { image })
    }

    /// For callers that already guarantee non-zero dimensions.
    pub(crate) fn from_nonempty(image: DynamicImage) -> Self {
        debug_assert!(image.width() > 0 && image.height() > 0);
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }
}

/// PNG/JPEG codec on top of `image`.
#[derive(Debug, Clone, Copy)]
pub struct RasterCodec {
    default_jpeg_quality: u8,
}

impl RasterCodec {
    pub fn new(default_jpeg_quality: u8) -> Self {
        Self {
            default_jpeg_quality: default_jpeg_quality.min(100),
        }
    }

    fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, CodecError> {
        // JPEG has no alpha channel and no 16-bit samples
        let pixels: Cow<'_, DynamicImage> = match image {
            DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => Cow::Borrowed(image),
            other => Cow::Owned(DynamicImage::ImageRgb8(other.to_rgb8())),
        };

        let (width, height) = pixels.dimensions();
        let mut buffer = Vec::with_capacity(capacity_hint(width, height, 4));
        // The encoder's floor is 1
        let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
        pixels
            .write_with_encoder(encoder)
            .map_err(|e| CodecError::Encode(e.to_string()))?;
        Ok(buffer)
    }

    fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, CodecError> {
        let (width, height) = image.dimensions();
        let mut buffer = Vec::with_capacity(capacity_hint(width, height, 1));
        let encoder = PngEncoder::new(&mut buffer);
        image
            .write_with_encoder(encoder)
            .map_err(|e| CodecError::Encode(e.to_string()))?;
        Ok(buffer)
    }
}

/// Output buffer guess of one byte per `divisor` pixels.
fn capacity_hint(width: u32, height: u32, divisor: usize) -> usize {
    (width as usize).saturating_mul(height as usize) / divisor
}

impl Default for RasterCodec {
    fn default() -> Self {
        Self::new(95)
    }
}

impl ImageCodec for RasterCodec {
    fn decode(&self, data: &[u8]) -> Result<DecodedImage, CodecError> {
        if data.is_empty() {
            return Err(CodecError::Decode("empty buffer".to_string()));
        }

        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| CodecError::Decode(e.to_string()))?;

        match reader.format() {
            Some(image::ImageFormat::Png) | Some(image::ImageFormat::Jpeg) => {}
            Some(other) => {
                return Err(CodecError::Decode(format!(
                    "unsupported encoding {:?}",
                    other
                )))
            }
            None => return Err(CodecError::Decode("unrecognised image data".to_string())),
        }

        let image = reader
            .decode()
            .map_err(|e| CodecError::Decode(e.to_string()))?;

        DecodedImage::new(image)
    }

    fn encode(
        &self,
        image: &DecodedImage,
        format: ImageFormat,
        quality: Option<u8>,
    ) -> Result<Bytes, CodecError> {
        let buffer = match format {
            ImageFormat::Jpeg => Self::encode_jpeg(
                image.as_dynamic(),
                quality.unwrap_or(self.default_jpeg_quality),
            )?,
            ImageFormat::Png => Self::encode_png(image.as_dynamic())?,
        };

        Ok(Bytes::from(buffer))
    }
}
