//! Face detection result types.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::{BoundingBox, Point2D};

/// The five named facial keypoints delivered by a landmark detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceKeypoints {
    /// Left eye center (subject's left as seen in the frame).
    pub left_eye: Point2D,
    /// Right eye center.
    pub right_eye: Point2D,
    /// Nose tip.
    pub nose: Point2D,
    /// Left mouth corner.
    pub mouth_left: Point2D,
    /// Right mouth corner.
    pub mouth_right: Point2D,
}

/// A single successfully detected face.
///
/// Only ever constructed for the exactly-one-face case; zero or multiple
/// candidates are rejected by [`FaceDetection::exactly_one`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceDetection {
    /// Face bounding box in frame pixels.
    pub bounding_box: BoundingBox,
    /// Detection confidence in `[0, 1]`.
    pub confidence: f32,
    /// The five named keypoints.
    pub keypoints: FaceKeypoints,
}

impl FaceDetection {
    /// Reduces a candidate list to the single face the pipeline requires.
    ///
    /// Zero and multiple faces are both ambiguous: neither can be trusted for
    /// a safety verdict, so both block downstream eye analysis equally.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DetectionAmbiguous`] unless exactly one candidate was
    /// supplied.
    pub fn exactly_one(mut candidates: Vec<Self>) -> Result<Self> {
        match candidates.len() {
            1 => Ok(candidates.remove(0)),
            found => Err(Error::DetectionAmbiguous { found }),
        }
    }
}
