//! Region brightness: mean luma as a proxy for scleral exposure.

use image::DynamicImage;

use crate::error::{Error, Result};

/// Computes the mean luminance of an eye region on the 0-255 scale.
///
/// Color regions are reduced to single-channel luma with the standard
/// perceptual weighting; the canonical channel order is RGB throughout the
/// pipeline. Alpha channels are dropped before conversion and never
/// contribute to the value.
///
/// # Errors
///
/// Returns [`Error::EmptyRegion`] when the region holds no pixels.
#[allow(clippy::cast_precision_loss)]
pub fn region_brightness(region: &DynamicImage) -> Result<f64> {
    if region.width() == 0 || region.height() == 0 {
        return Err(Error::EmptyRegion);
    }

    let gray = region.to_luma8();
    let sum: u64 = gray.pixels().map(|p| u64::from(p.0[0])).sum();

    Ok(sum as f64 / f64::from(gray.width() * gray.height()))
}

/// Classifies an eye region as open when its brightness strictly exceeds the
/// threshold.
///
/// Any failure computing brightness classifies the eye as closed — erring
/// toward "not awake" is the safety bias of the whole pipeline, so faults
/// must never surface as an open verdict.
#[must_use]
pub fn is_eye_open(region: &DynamicImage, threshold: f64) -> bool {
    match region_brightness(region) {
        Ok(brightness) => brightness > threshold,
        Err(_) => false,
    }
}
