//! Image metadata returned by the resolver.

use std::path::{Path, PathBuf};

/// Image formats in the local image set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
}

impl ImageFormat {
    /// Map a decoder format onto the supported set.
    pub fn from_image(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Jpeg => Some(Self::Jpeg),
            image::ImageFormat::Png => Some(Self::Png),
            image::ImageFormat::Gif => Some(Self::Gif),
            _ => None,
        }
    }

    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
        }
    }
}

/// A resolved image asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMetadata {
    /// Public URL path, e.g. `/images/cat.png`
    pub src: String,
    /// Absolute source file
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    /// File size in bytes
    pub size: u64,
}

impl ImageMetadata {
    /// Where the image is published under `output`.
    pub fn output_path(&self, output: &Path) -> PathBuf {
        output.join(self.src.trim_start_matches('/'))
    }
}
