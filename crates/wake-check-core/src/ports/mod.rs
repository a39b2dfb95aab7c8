//! Port definitions for the external collaborators.
//!
//! These traits define the boundary between the analysis core and the
//! detector/frame-source adapters.

mod face_detector;
mod frame_source;

pub use face_detector::FaceDetector;
pub use frame_source::FrameSource;
