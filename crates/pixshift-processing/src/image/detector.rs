//! Content sniffing by magic bytes.

use pixshift_core::ImageFormat;

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Classifies raw bytes by their signature, ignoring any file name.
pub struct FormatDetector;

impl FormatDetector {
    /// Returns `None` when the buffer is neither PNG nor JPEG.
    pub fn detect(data: &[u8]) -> Option<ImageFormat> {
        if data.starts_with(PNG_SIGNATURE) {
            Some(ImageFormat::Png)
        } else if data.starts_with(JPEG_SIGNATURE) {
            Some(ImageFormat::Jpeg)
        } else {
            None
        }
    }

    pub fn is_png(data: &[u8]) -> bool {
        Self::detect(data) == Some(ImageFormat::Png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{gradient_jpeg, gradient_png};

    #[test]
    fn test_detect_png() {
        assert_eq!(FormatDetector::detect(&gradient_png(4, 4)), Some(ImageFormat::Png));
        assert!(FormatDetector::is_png(&gradient_png(1, 1)));
    }

    #[test]
    fn test_detect_jpeg() {
        let jpeg = gradient_jpeg(8, 8, 90);
        assert_eq!(FormatDetector::detect(&jpeg), Some(ImageFormat::Jpeg));
        assert!(!FormatDetector::is_png(&jpeg));
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(FormatDetector::detect(b""), None);
        assert_eq!(FormatDetector::detect(b"GIF89a......"), None);
        assert_eq!(FormatDetector::detect(b"not an image"), None);
        // Truncated PNG signature
        assert_eq!(FormatDetector::detect(&PNG_SIGNATURE[..4]), None);
    }
}
