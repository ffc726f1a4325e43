//! Image processing module
//!
//! - Content sniffing (detector)
//! - Decoding and encoding (codec)
//! - Geometric resizing (transformer)

pub mod codec;
pub mod detector;
pub mod transformer;

pub use codec::{DecodedImage, RasterCodec};
pub use detector::FormatDetector;
pub use transformer::{ImageTransformer, TargetDimensions};
