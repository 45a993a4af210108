use serde::Serialize;

use crate::formats::{gif, jpeg, png, webp};

/// Pixel dimensions read from an image header. Both sides are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[inline]
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self { width, height })
    }

    #[inline]
    #[must_use]
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    WebP,
    Png,
    Jpeg,
    Gif,
}

impl ImageFormat {
    /// Order in which the dispatcher tries each parser. Signatures are mutually
    /// exclusive, so the order only affects how quickly a match is found.
    pub const PROBE_ORDER: [ImageFormat; 4] = [
        ImageFormat::WebP,
        ImageFormat::Png,
        ImageFormat::Jpeg,
        ImageFormat::Gif,
    ];

    #[must_use]
    pub fn parse(self, data: &[u8]) -> Option<Dimensions> {
        match self {
            Self::WebP => webp::webp_dimensions(data),
            Self::Png => png::png_dimensions(data),
            Self::Jpeg => jpeg::jpeg_dimensions(data),
            Self::Gif => gif::gif_dimensions(data),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::WebP => "WebP",
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
            Self::Gif => "GIF",
        }
    }

    #[must_use]
    pub const fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::WebP => &["webp"],
            Self::Png => &["png"],
            Self::Jpeg => &["jpg", "jpeg"],
            Self::Gif => &["gif"],
        }
    }

    /// Matches a file name by extension, case-insensitively.
    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        let ext = ext.to_ascii_lowercase();
        Self::PROBE_ORDER
            .into_iter()
            .find(|format| format.extensions().contains(&ext.as_str()))
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
