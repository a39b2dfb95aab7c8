//! Personalized brightness-threshold calibration.
//!
//! Calibration runs the same sampling pipeline as live checking over two
//! labeled batches — one captured with eyes open, one with eyes closed — and
//! fits the cutoff between the two brightness populations.

mod calibrator;
mod file;
mod result;
mod stats;

pub use calibrator::{ThresholdCalibrator, DEFAULT_TARGET_FRAMES};
pub use file::{CalibrationRecord, DEFAULT_THRESHOLD};
pub use result::{CalibrationResult, SeparationQuality, MIN_SAMPLES_PER_SET};
pub use stats::{mean, sample_std_dev};
