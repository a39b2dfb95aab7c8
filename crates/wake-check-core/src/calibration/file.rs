//! Text codec for persisted calibration state.
//!
//! The store is a human-readable `key = value` file (TOML scalar grammar)
//! with the keys `threshold`, `open_avg`, `closed_avg`, and `separation`.
//! Parsing and rendering are pure; file placement and I/O live in the
//! adapters crate.

use serde::Deserialize;

use crate::error::{Error, Result};

use super::result::CalibrationResult;

/// Threshold used when no calibration has been stored.
pub const DEFAULT_THRESHOLD: f64 = 90.0;

/// Separation below which a stored calibration is considered unusable.
const MIN_STORED_SEPARATION: f64 = 10.0;

/// Persisted calibration values as read from (or written to) the store.
///
/// Every field is optional: an absent store or an absent key is not an
/// error — the loader falls back to the default threshold.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CalibrationRecord {
    /// Applied brightness threshold.
    pub threshold: Option<i64>,
    /// Mean open-eye brightness at calibration time.
    pub open_avg: Option<f64>,
    /// Mean closed-eye brightness at calibration time.
    pub closed_avg: Option<f64>,
    /// `open_avg - closed_avg` at calibration time.
    pub separation: Option<f64>,
}

impl CalibrationRecord {
    /// Parses the stored text form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCalibration`] when the text is not valid
    /// key/value syntax or a value has the wrong type.
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text)
            .map_err(|e| Error::InvalidCalibration(format!("unreadable calibration state: {e}")))
    }

    /// Renders the stored text form, two decimals for the statistics.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from("# wake-check brightness threshold calibration\n");
        if let Some(threshold) = self.threshold {
            out.push_str(&format!("threshold = {threshold}\n"));
        }
        if let Some(open_avg) = self.open_avg {
            out.push_str(&format!("open_avg = {open_avg:.2}\n"));
        }
        if let Some(closed_avg) = self.closed_avg {
            out.push_str(&format!("closed_avg = {closed_avg:.2}\n"));
        }
        if let Some(separation) = self.separation {
            out.push_str(&format!("separation = {separation:.2}\n"));
        }
        out
    }

    /// Builds the record persisted after a successful calibration run.
    #[must_use]
    pub fn from_result(result: &CalibrationResult) -> Self {
        Self {
            threshold: Some(i64::from(result.threshold)),
            open_avg: Some(result.open_mean),
            closed_avg: Some(result.closed_mean),
            separation: Some(result.separation),
        }
    }

    /// The stored threshold, or [`DEFAULT_THRESHOLD`] when the key is absent.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn threshold_or_default(&self) -> f64 {
        self.threshold.map_or(DEFAULT_THRESHOLD, |t| t as f64)
    }

    /// Sanity-checks the stored calibration.
    ///
    /// Missing keys are treated as zero, matching the bounds checks below.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCalibration`] when the threshold is outside
    /// `[30, 200]`, the separation is below 10, or the means are inverted
    /// (a closed mean at or above the open mean indicates a failed capture
    /// session).
    pub fn validate(&self) -> Result<()> {
        let threshold = self.threshold.unwrap_or(0);
        if !(30..=200).contains(&threshold) {
            return Err(Error::InvalidCalibration(format!(
                "threshold {threshold} outside the sane range 30-200"
            )));
        }

        let separation = self.separation.unwrap_or(0.0);
        if separation < MIN_STORED_SEPARATION {
            return Err(Error::InvalidCalibration(format!(
                "separation {separation:.1} below the usable minimum {MIN_STORED_SEPARATION}"
            )));
        }

        let open_avg = self.open_avg.unwrap_or(0.0);
        let closed_avg = self.closed_avg.unwrap_or(0.0);
        if closed_avg >= open_avg {
            return Err(Error::InvalidCalibration(format!(
                "inverted samples: closed mean {closed_avg:.1} >= open mean {open_avg:.1}"
            )));
        }

        Ok(())
    }

    /// Convenience wrapper over [`Self::validate`].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}
