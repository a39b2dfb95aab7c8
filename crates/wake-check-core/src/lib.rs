//! wake-check core — eye-openness analysis for alertness checking.
//!
//! The pipeline classifies each eye open or closed by the mean luminance of
//! a small region around its landmark (open eyes expose bright sclera,
//! closed eyes show darker eyelids), folds the two verdicts into a strict
//! both-eyes conjunction, and debounces the result over consecutive frames.
//! A calibration protocol fits the brightness cutoff per user and setup.
//!
//! Detection and frame capture are external collaborators behind the
//! [`ports`] traits; this crate is pure computation.

pub mod analysis;
pub mod awakeness;
pub mod calibration;
pub mod checker;
pub mod domain;
pub mod error;
pub mod ports;

pub use analysis::{extract_eye_region, is_eye_open, region_brightness, EyeAnalyzer};
pub use awakeness::{AwakenessSession, AwakenessState};
pub use calibration::{
    CalibrationRecord, CalibrationResult, SeparationQuality, ThresholdCalibrator,
    DEFAULT_TARGET_FRAMES, DEFAULT_THRESHOLD, MIN_SAMPLES_PER_SET,
};
pub use checker::AwakenessChecker;
pub use domain::{
    BoundingBox, DualEyeResult, EyeVerdict, FaceDetection, FaceKeypoints, Frame, Point2D,
    RegionSize,
};
pub use error::{Error, Result};
pub use ports::{FaceDetector, FrameSource};
