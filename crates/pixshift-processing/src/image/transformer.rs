//! Image transformer - geometric operations on decoded images

use crate::error::CodecError;
use crate::image::DecodedImage;
use image::imageops::FilterType;

/// Validated output size. Both sides are in `1..=max` for the bound it was
/// built against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetDimensions {
    width: u32,
    height: u32,
}

impl TargetDimensions {
    pub fn new(width: i64, height: i64, max_dimension: u32) -> Result<Self, CodecError> {
        let max = i64::from(max_dimension);
        if width <= 0 || height <= 0 {
            return Err(CodecError::InvalidDimension(format!(
                "{}x{} (width and height must be positive)",
                width, height
            )));
        }
        if width > max || height > max {
            return Err(CodecError::InvalidDimension(format!(
                "{}x{} exceeds the maximum of {} pixels per side",
                width, height, max_dimension
            )));
        }

        Ok(Self {
            width: width as u32,
            height: height as u32,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Main image transformer
pub struct ImageTransformer;

impl ImageTransformer {
    /// Resize to exactly `target`, ignoring the source aspect ratio.
    /// A single triangle (linear) filter pass. An image already at the target
    /// size is handed back untouched.
    pub fn resize(image: DecodedImage, target: TargetDimensions) -> DecodedImage {
        if image.dimensions() == (target.width, target.height) {
            return image;
        }

        let resized = image
            .as_dynamic()
            .resize_exact(target.width, target.height, FilterType::Triangle);

        // Both sides are non-zero by construction of TargetDimensions
        DecodedImage::from_nonempty(resized)
    }
}
