//! Face-landmark detector port.

use image::DynamicImage;

use crate::domain::FaceDetection;
use crate::error::Result;

/// Port for face-landmark detection backends.
///
/// Implementations must honor the exactly-one-face policy: zero or multiple
/// faces both yield [`crate::Error::DetectionAmbiguous`], never a "best"
/// pick. [`FaceDetection::exactly_one`] applies the rule to a candidate list.
/// Backend faults map to [`crate::Error::Detector`].
///
/// The call may block on inference; the core imposes no timeout of its own.
pub trait FaceDetector: Send + Sync {
    /// Detects the single face in the frame with its five keypoints.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::DetectionAmbiguous`] for zero or multiple
    /// faces and [`crate::Error::Detector`] for backend faults.
    fn detect(&self, frame: &DynamicImage) -> Result<FaceDetection>;
}
