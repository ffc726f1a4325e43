//! Core traits for image processing

use crate::error::CodecError;
use crate::image::DecodedImage;
use bytes::Bytes;
use pixshift_core::ImageFormat;

/// Codec trait - turns encoded bytes into pixels and back
///
/// Implementations are synchronous and CPU bound; the pipeline runs them on the
/// blocking thread pool.
pub trait ImageCodec: Send + Sync {
    /// Decode an in-memory PNG or JPEG buffer
    fn decode(&self, data: &[u8]) -> Result<DecodedImage, CodecError>;

    /// Encode `image` as `format`. `quality` (0-100) applies to JPEG only; `None`
    /// selects the codec's default.
    fn encode(
        &self,
        image: &DecodedImage,
        format: ImageFormat,
        quality: Option<u8>,
    ) -> Result<Bytes, CodecError>;
}
