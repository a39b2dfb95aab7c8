//! Dual-eye evaluator combining region sampling with brightness
//! classification.

use image::DynamicImage;
use tracing::debug;

use crate::domain::{DualEyeResult, EyeVerdict, Point2D, RegionSize};
use crate::error::{Error, Result};

use super::{extract_eye_region, region_brightness};

/// Analyzes eye regions to determine whether eyes are open or closed.
///
/// Works on the principle that open eyes expose bright sclera while closed
/// eyes show darker eyelids: each eye is classified by comparing its region's
/// mean luminance against a calibratable threshold.
#[derive(Debug, Clone)]
pub struct EyeAnalyzer {
    threshold: f64,
    region_size: RegionSize,
}

impl EyeAnalyzer {
    /// Creates an analyzer with the given brightness threshold and region
    /// size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when the threshold leaves the
    /// 0-255 scale or either region dimension is zero.
    pub fn new(threshold: f64, region_size: RegionSize) -> Result<Self> {
        validate_threshold(threshold)?;
        validate_region_size(region_size)?;
        Ok(Self {
            threshold,
            region_size,
        })
    }

    /// Creates an analyzer with the default 30x20 eye region.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when the threshold leaves the
    /// 0-255 scale.
    pub fn with_default_region(threshold: f64) -> Result<Self> {
        Self::new(threshold, RegionSize::default())
    }

    /// Current brightness threshold.
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Current eye region size.
    #[must_use]
    pub const fn region_size(&self) -> RegionSize {
        self.region_size
    }

    /// Replaces the brightness threshold.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when the value leaves the 0-255
    /// scale.
    pub fn set_threshold(&mut self, threshold: f64) -> Result<()> {
        validate_threshold(threshold)?;
        self.threshold = threshold;
        Ok(())
    }

    /// Replaces the eye region size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when either dimension is zero.
    pub fn set_region_size(&mut self, region_size: RegionSize) -> Result<()> {
        validate_region_size(region_size)?;
        self.region_size = region_size;
        Ok(())
    }

    /// Samples the brightness of one eye without classifying it.
    ///
    /// Used by calibration, which collects raw brightness values under a
    /// neutral threshold.
    ///
    /// # Errors
    ///
    /// Propagates region extraction and brightness faults.
    pub fn sample_brightness(&self, frame: &DynamicImage, center: Point2D) -> Result<f64> {
        let region = extract_eye_region(frame, center, self.region_size)?;
        region_brightness(&region)
    }

    /// Analyzes a single eye.
    ///
    /// # Errors
    ///
    /// Propagates region extraction and brightness faults.
    pub fn analyze_single(&self, frame: &DynamicImage, center: Point2D) -> Result<EyeVerdict> {
        let brightness = self.sample_brightness(frame, center)?;
        Ok(EyeVerdict {
            brightness,
            is_open: brightness > self.threshold,
        })
    }

    /// Analyzes both eyes and folds them into one verdict.
    ///
    /// Either eye failing marks the whole result unsuccessful with an error
    /// naming the eye, and `both_open` stays false — a partially analyzed
    /// face is never trusted. On success `both_open` is the strict
    /// conjunction of the per-eye verdicts.
    #[must_use]
    pub fn analyze_both(
        &self,
        frame: &DynamicImage,
        left_eye: Point2D,
        right_eye: Point2D,
    ) -> DualEyeResult {
        let left = match self.analyze_single(frame, left_eye) {
            Ok(verdict) => verdict,
            Err(e) => {
                debug!("left eye analysis failed: {e}");
                return DualEyeResult::failure(format!("left eye analysis failed: {e}"));
            }
        };

        let right = match self.analyze_single(frame, right_eye) {
            Ok(verdict) => verdict,
            Err(e) => {
                debug!("right eye analysis failed: {e}");
                return DualEyeResult::failure(format!("right eye analysis failed: {e}"));
            }
        };

        DualEyeResult::success(left, right)
    }
}

fn validate_threshold(threshold: f64) -> Result<()> {
    if (0.0..=255.0).contains(&threshold) {
        Ok(())
    } else {
        Err(Error::InvalidParameter(format!(
            "brightness threshold must be between 0 and 255, got {threshold}"
        )))
    }
}

fn validate_region_size(size: RegionSize) -> Result<()> {
    if size.width == 0 || size.height == 0 {
        return Err(Error::InvalidParameter(format!(
            "eye region size must be positive, got {}x{}",
            size.width, size.height
        )));
    }
    Ok(())
}
