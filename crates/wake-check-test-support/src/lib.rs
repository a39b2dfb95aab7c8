//! Test support utilities for wake-check.
//!
//! Provides mocks for the detector and frame-source ports plus synthetic
//! face-frame builders for testing the analysis pipeline.
//!
//! # Example
//!
//! ```
//! use wake_check_test_support::{MockFaceDetector, SyntheticFaceBuilder};
//!
//! // A frame with both eye patches bright (reads as awake)
//! let frame = SyntheticFaceBuilder::awake_frame();
//!
//! // A detector that always finds the synthetic face
//! let detector = MockFaceDetector::always(SyntheticFaceBuilder::detection());
//! ```

mod builders;
mod mocks;

pub use builders::SyntheticFaceBuilder;
pub use mocks::{MockDetection, MockFaceDetector, MockFrameSource};
