//! Core domain types for awakeness checking.

mod detection;
mod frame;
mod geometry;
mod verdict;

pub use detection::{FaceDetection, FaceKeypoints};
pub use frame::Frame;
pub use geometry::{BoundingBox, Point2D, RegionSize};
pub use verdict::{DualEyeResult, EyeVerdict};
