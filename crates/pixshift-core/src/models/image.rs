use std::fmt::{Display, Formatter, Result as FmtResult};

/// Raster formats the service reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    /// Map a declared file extension (with or without the leading dot) to a format.
    ///
    /// Matching is exact: only lowercase `png`, `jpg` and `jpeg` are recognised,
    /// so `photo.PNG` is not an image to the pipeline.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.strip_prefix('.').unwrap_or(ext) {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
        }
    }

    pub fn to_mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }
}

impl Display for ImageFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ImageFormat::Png => write!(f, "PNG"),
            ImageFormat::Jpeg => write!(f, "JPEG"),
        }
    }
}

/// Logical output area an object is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputCategory {
    Converted,
    Resized,
    Compressed,
    /// Staging area for raw inputs
    Uploads,
}

impl OutputCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputCategory::Converted => "converted",
            OutputCategory::Resized => "resized",
            OutputCategory::Compressed => "compressed",
            OutputCategory::Uploads => "uploads",
        }
    }
}

impl Display for OutputCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(ImageFormat::from_extension("png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_extension(".png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_extension("PNG"), None);
        assert_eq!(ImageFormat::from_extension(".Jpg"), None);
        assert_eq!(ImageFormat::from_extension("jpg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension(".jpeg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("gif"), None);
        assert_eq!(ImageFormat::from_extension(""), None);
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(ImageFormat::Png.to_mime_type(), "image/png");
        assert_eq!(ImageFormat::Jpeg.to_mime_type(), "image/jpeg");
    }
}
