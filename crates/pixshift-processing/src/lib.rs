//! Pixshift Image Processing Library
//!
//! This crate provides the image transformation pipeline: content sniffing,
//! decoding and encoding, resizing, and the convert/resize/compress policies
//! that tie them to an output sink.

pub mod error;
pub mod image;
pub mod pipeline;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used types
pub use error::{BatchAborted, CodecError, PipelineError};
pub use self::image::{DecodedImage, FormatDetector, ImageTransformer, RasterCodec, TargetDimensions};
pub use pipeline::{PipelineOptions, TransformPipeline};
pub use traits::ImageCodec;
