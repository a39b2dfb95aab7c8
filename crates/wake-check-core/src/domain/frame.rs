//! Frame wrapper handed through the pipeline.

use image::DynamicImage;

/// A single frame from a frame source.
///
/// The pixel data is read-only to the core. Color frames are expected in RGB
/// channel order; sources delivering another order must convert before
/// handing frames over.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Where the frame came from (file path or synthetic label).
    pub origin: String,
    /// Decoded pixel data.
    pub image: DynamicImage,
}

impl Frame {
    /// Wraps decoded pixel data with its origin label.
    #[must_use]
    pub fn new(origin: impl Into<String>, image: DynamicImage) -> Self {
        Self {
            origin: origin.into(),
            image,
        }
    }

    /// Frame width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Frame height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}
