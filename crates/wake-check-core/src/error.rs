//! Error taxonomy for the wake-check core.

use thiserror::Error;

/// Errors produced by eye analysis, awakeness tracking, and calibration.
///
/// Configuration-time faults (`InvalidParameter`) and calibration faults
/// (`InsufficientData`, `InvalidCalibration`) surface to the caller; per-frame
/// faults are swallowed at the checker boundary and resolve to a negative
/// verdict.
#[derive(Debug, Error)]
pub enum Error {
    /// An out-of-range argument rejected at configuration time.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The clamped eye-region crop has zero extent (center outside the frame).
    #[error(
        "invalid eye region: center ({x:.1}, {y:.1}) with region size \
         {width}x{height} falls outside the frame"
    )]
    InvalidRegion {
        /// Eye center x coordinate in frame pixels.
        x: f32,
        /// Eye center y coordinate in frame pixels.
        y: f32,
        /// Requested region width.
        width: u32,
        /// Requested region height.
        height: u32,
    },

    /// A region with no pixels was handed to the brightness classifier.
    #[error("eye region contains no pixels")]
    EmptyRegion,

    /// Zero or more than one face was found; both block eye analysis equally.
    #[error("expected exactly one face, found {found}")]
    DetectionAmbiguous {
        /// Number of faces the detector reported.
        found: usize,
    },

    /// A calibration sample set fell below the minimum size.
    #[error(
        "insufficient calibration data: {open} open-eye and {closed} \
         closed-eye samples, need at least {minimum} each"
    )]
    InsufficientData {
        /// Collected open-eye samples.
        open: usize,
        /// Collected closed-eye samples.
        closed: usize,
        /// Required minimum per set.
        minimum: usize,
    },

    /// Persisted calibration state failed its sanity checks.
    #[error("invalid calibration: {0}")]
    InvalidCalibration(String),

    /// The face detector backend failed.
    #[error("face detector failure")]
    Detector(#[source] anyhow::Error),

    /// The frame source failed to produce a frame.
    #[error("frame source failure")]
    FrameSource(#[source] anyhow::Error),
}

/// Convenience alias used throughout the core.
pub type Result<T> = std::result::Result<T, Error>;
