//! Eye-region extraction: crop clamped to frame bounds, zero-padded to size.

// Allow common image-geometry code patterns
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use image::{imageops, DynamicImage, ImageBuffer, Pixel};

use crate::domain::{Point2D, RegionSize};
use crate::error::{Error, Result};

/// Extracts a fixed-size rectangular region centered on an eye keypoint.
///
/// The crop box is clamped to the frame bounds; when the clamped crop is
/// smaller than the requested size (eye near an edge) the result is
/// zero-padded symmetrically so the output is always exactly `size`, with the
/// cropped pixels centered. This is crop-plus-pad only, never scaling, so
/// brightness statistics stay comparable across frames.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] when either size component is zero and
/// [`Error::InvalidRegion`] when the center lies far enough outside the frame
/// that the clamped crop has no extent.
pub fn extract_eye_region(
    frame: &DynamicImage,
    center: Point2D,
    size: RegionSize,
) -> Result<DynamicImage> {
    if size.width == 0 || size.height == 0 {
        return Err(Error::InvalidParameter(format!(
            "eye region size must be positive, got {}x{}",
            size.width, size.height
        )));
    }

    let width = i64::from(frame.width());
    let height = i64::from(frame.height());

    // Truncate toward zero, matching the integer pixel grid.
    let eye_x = center.x as i64;
    let eye_y = center.y as i64;

    let half_width = i64::from(size.width / 2);
    let half_height = i64::from(size.height / 2);

    let x1 = (eye_x - half_width).max(0);
    let y1 = (eye_y - half_height).max(0);
    let x2 = (eye_x + half_width).min(width);
    let y2 = (eye_y + half_height).min(height);

    if x2 <= x1 || y2 <= y1 {
        return Err(Error::InvalidRegion {
            x: center.x,
            y: center.y,
            width: size.width,
            height: size.height,
        });
    }

    let crop_w = (x2 - x1) as u32;
    let crop_h = (y2 - y1) as u32;
    let (x1, y1) = (x1 as u32, y1 as u32);

    let region = match frame {
        DynamicImage::ImageLuma8(img) => {
            DynamicImage::ImageLuma8(crop_and_pad(img, x1, y1, crop_w, crop_h, size))
        }
        DynamicImage::ImageLumaA8(img) => {
            DynamicImage::ImageLumaA8(crop_and_pad(img, x1, y1, crop_w, crop_h, size))
        }
        DynamicImage::ImageRgb8(img) => {
            DynamicImage::ImageRgb8(crop_and_pad(img, x1, y1, crop_w, crop_h, size))
        }
        DynamicImage::ImageRgba8(img) => {
            DynamicImage::ImageRgba8(crop_and_pad(img, x1, y1, crop_w, crop_h, size))
        }
        other => {
            // Uncommon bit depths are routed through RGB8 before cropping.
            let rgb = other.to_rgb8();
            DynamicImage::ImageRgb8(crop_and_pad(&rgb, x1, y1, crop_w, crop_h, size))
        }
    };

    Ok(region)
}

/// Crops `image` and, when the crop is smaller than `size`, centers it in a
/// zero-filled canvas of exactly `size`.
fn crop_and_pad<P>(
    image: &ImageBuffer<P, Vec<P::Subpixel>>,
    x: u32,
    y: u32,
    crop_w: u32,
    crop_h: u32,
    size: RegionSize,
) -> ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel + 'static,
{
    let cropped = imageops::crop_imm(image, x, y, crop_w, crop_h).to_image();

    if crop_w == size.width && crop_h == size.height {
        return cropped;
    }

    let pad_left = (size.width - crop_w) / 2;
    let pad_top = (size.height - crop_h) / 2;

    // ImageBuffer::new zero-initializes, which is the padding value.
    let mut canvas = ImageBuffer::new(size.width, size.height);
    imageops::replace(&mut canvas, &cropped, i64::from(pad_left), i64::from(pad_top));
    canvas
}
