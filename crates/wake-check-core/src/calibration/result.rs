//! Calibration result: fitted threshold plus the statistics behind it.

use serde::Serialize;

use crate::error::{Error, Result};

use super::stats::{mean, sample_std_dev};

/// Minimum samples each labeled set must contain before a threshold can be
/// fitted. Deliberately looser than what the default frame target produces
/// (10 frames x 2 eyes = 20 samples): three successful frames per phase are
/// enough to proceed.
pub const MIN_SAMPLES_PER_SET: usize = 5;

/// Margin subtracted from the midpoint so the cutoff leans strict: a
/// borderline eye reads as closed rather than open.
const SAFETY_MARGIN: f64 = 5.0;

/// Lowest threshold considered sane.
const THRESHOLD_FLOOR: u8 = 30;

/// Highest threshold considered sane.
const THRESHOLD_CEIL: u8 = 200;

/// Qualitative label for the open/closed brightness separation.
///
/// Advisory only: a poor label warns the operator about lighting but never
/// blocks saving the calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeparationQuality {
    /// Separation above 50: the classifier should work very well.
    Excellent,
    /// Separation above 30.
    Good,
    /// Separation above 15: may need better lighting.
    Moderate,
    /// Anything less: improve lighting or camera angle and retry.
    Poor,
}

impl SeparationQuality {
    /// Labels a separation value.
    #[must_use]
    pub fn from_separation(separation: f64) -> Self {
        if separation > 50.0 {
            Self::Excellent
        } else if separation > 30.0 {
            Self::Good
        } else if separation > 15.0 {
            Self::Moderate
        } else {
            Self::Poor
        }
    }

    /// Lowercase label for display.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Moderate => "moderate",
            Self::Poor => "poor",
        }
    }
}

impl std::fmt::Display for SeparationQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fitted brightness threshold with the statistics it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibrationResult {
    /// Applied threshold: midpoint minus safety margin, clamped to sanity
    /// bounds.
    pub threshold: u8,
    /// Mean brightness of the open-eye samples.
    pub open_mean: f64,
    /// Mean brightness of the closed-eye samples.
    pub closed_mean: f64,
    /// Sample standard deviation of the open-eye samples.
    pub open_std_dev: f64,
    /// Sample standard deviation of the closed-eye samples.
    pub closed_std_dev: f64,
    /// `open_mean - closed_mean`; proxy for classifier reliability.
    pub separation: f64,
}

impl CalibrationResult {
    /// Fits a threshold from two labeled brightness sample sets.
    ///
    /// The recommended cutoff is the midpoint of the two means; the applied
    /// threshold subtracts the safety margin, floors, and clamps into
    /// `[30, 200]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientData`] when either set holds fewer than
    /// [`MIN_SAMPLES_PER_SET`] values.
    pub fn from_samples(open: &[f64], closed: &[f64]) -> Result<Self> {
        if open.len() < MIN_SAMPLES_PER_SET || closed.len() < MIN_SAMPLES_PER_SET {
            return Err(Error::InsufficientData {
                open: open.len(),
                closed: closed.len(),
                minimum: MIN_SAMPLES_PER_SET,
            });
        }

        let open_mean = mean(open);
        let closed_mean = mean(closed);

        let recommended = (open_mean + closed_mean) / 2.0;
        #[allow(clippy::cast_possible_truncation)]
        let strict = (recommended - SAFETY_MARGIN).floor() as i64;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let threshold = strict.clamp(i64::from(THRESHOLD_FLOOR), i64::from(THRESHOLD_CEIL)) as u8;

        Ok(Self {
            threshold,
            open_mean,
            closed_mean,
            open_std_dev: sample_std_dev(open),
            closed_std_dev: sample_std_dev(closed),
            separation: open_mean - closed_mean,
        })
    }

    /// Qualitative separation label.
    #[must_use]
    pub fn quality(&self) -> SeparationQuality {
        SeparationQuality::from_separation(self.separation)
    }
}
