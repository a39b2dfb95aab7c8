//! Strict awakeness checking: detection, dual-eye analysis, and debounce.

use image::DynamicImage;
use tracing::debug;

use crate::analysis::EyeAnalyzer;
use crate::awakeness::{AwakenessSession, AwakenessState};
use crate::domain::{DualEyeResult, RegionSize};
use crate::error::Result;
use crate::ports::FaceDetector;

/// Strict boolean awakeness checker.
///
/// Built for safety applications where a false "awake" is dangerous: it
/// requires exactly one detected face, both eyes open, and a streak of
/// consecutive positive frames. Any error or ambiguity on the per-frame path
/// resolves to "not awake" instead of propagating.
pub struct AwakenessChecker {
    detector: Box<dyn FaceDetector>,
    analyzer: EyeAnalyzer,
    session: AwakenessSession,
}

impl AwakenessChecker {
    /// Creates a checker over the given detector backend.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidParameter`] for a threshold outside
    /// 0-255 or a zero frame requirement.
    pub fn new(
        detector: Box<dyn FaceDetector>,
        threshold: f64,
        required_frames: u32,
    ) -> Result<Self> {
        Ok(Self {
            detector,
            analyzer: EyeAnalyzer::with_default_region(threshold)?,
            session: AwakenessSession::new(required_frames)?,
        })
    }

    /// Runs detection and dual-eye analysis on one frame.
    ///
    /// Unlike [`Self::is_awake`] this surfaces detection faults, so callers
    /// can report *why* a frame failed (one-shot check output).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::DetectionAmbiguous`] or
    /// [`crate::Error::Detector`] when no single face was found.
    pub fn analyze_frame(&self, frame: &DynamicImage) -> Result<DualEyeResult> {
        let face = self.detector.detect(frame)?;
        Ok(self.analyzer.analyze_both(
            frame,
            face.keypoints.left_eye,
            face.keypoints.right_eye,
        ))
    }

    /// Single-frame awakeness verdict.
    ///
    /// True only when exactly one face was found and both eyes are
    /// definitively open. Every error, ambiguity, or partial result yields
    /// false; this method never fails.
    #[must_use]
    pub fn is_awake(&self, frame: &DynamicImage) -> bool {
        match self.analyze_frame(frame) {
            Ok(result) => result.both_open,
            Err(e) => {
                debug!("frame resolved to not-awake: {e}");
                false
            }
        }
    }

    /// Feeds one frame through the debounce session and returns the state.
    pub fn observe(&mut self, frame: &DynamicImage) -> AwakenessState {
        let awake = self.is_awake(frame);
        self.session.observe(awake)
    }

    /// Feeds an explicit negative verdict, for frames that could not be
    /// produced at all (capture faults resolve to "not awake" like any other
    /// per-frame fault).
    pub fn observe_negative(&mut self) -> AwakenessState {
        self.session.observe(false)
    }

    /// The debounce session.
    #[must_use]
    pub const fn session(&self) -> &AwakenessSession {
        &self.session
    }

    /// Current brightness threshold.
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.analyzer.threshold()
    }

    /// Resets the debounce session to idle.
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Replaces the brightness threshold.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidParameter`] for values outside 0-255.
    pub fn set_threshold(&mut self, threshold: f64) -> Result<()> {
        self.analyzer.set_threshold(threshold)
    }

    /// Replaces the eye region size.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidParameter`] when either dimension is
    /// zero.
    pub fn set_region_size(&mut self, region_size: RegionSize) -> Result<()> {
        self.analyzer.set_region_size(region_size)
    }

    /// Replaces the consecutive-frame requirement, resetting the session.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidParameter`] when `required` is zero.
    pub fn set_required(&mut self, required: u32) -> Result<()> {
        self.session.set_required(required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BoundingBox, FaceDetection, FaceKeypoints, Point2D};
    use crate::error::Error;
    use image::{GrayImage, Luma};

    /// Detector stub returning a fixed outcome per call.
    struct ScriptedDetector {
        outcome: fn() -> Result<FaceDetection>,
    }

    impl FaceDetector for ScriptedDetector {
        fn detect(&self, _frame: &DynamicImage) -> Result<FaceDetection> {
            (self.outcome)()
        }
    }

    fn face_at_eyes() -> Result<FaceDetection> {
        Ok(FaceDetection {
            bounding_box: BoundingBox {
                x: 20.0,
                y: 20.0,
                width: 160.0,
                height: 120.0,
            },
            confidence: 0.95,
            keypoints: FaceKeypoints {
                left_eye: Point2D::new(60.0, 80.0),
                right_eye: Point2D::new(140.0, 80.0),
                nose: Point2D::new(100.0, 100.0),
                mouth_left: Point2D::new(70.0, 120.0),
                mouth_right: Point2D::new(130.0, 120.0),
            },
        })
    }

    fn ambiguous() -> Result<FaceDetection> {
        Err(Error::DetectionAmbiguous { found: 0 })
    }

    /// Frame with uniform patches at the scripted eye positions.
    fn frame_with_eyes(value: u8) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_fn(200, 160, |_, _| Luma([value])))
    }

    #[test]
    fn test_awake_when_both_eyes_bright() {
        let checker = AwakenessChecker::new(
            Box::new(ScriptedDetector {
                outcome: face_at_eyes,
            }),
            90.0,
            3,
        )
        .unwrap();

        assert!(checker.is_awake(&frame_with_eyes(180)));
        assert!(!checker.is_awake(&frame_with_eyes(40)));
    }

    #[test]
    fn test_detection_ambiguity_is_not_awake() {
        let checker = AwakenessChecker::new(
            Box::new(ScriptedDetector { outcome: ambiguous }),
            90.0,
            3,
        )
        .unwrap();

        assert!(!checker.is_awake(&frame_with_eyes(180)));
    }

    #[test]
    fn test_analyze_frame_surfaces_detection_error() {
        let checker = AwakenessChecker::new(
            Box::new(ScriptedDetector { outcome: ambiguous }),
            90.0,
            3,
        )
        .unwrap();

        let err = checker.analyze_frame(&frame_with_eyes(180)).unwrap_err();
        assert!(matches!(err, Error::DetectionAmbiguous { found: 0 }));
    }

    #[test]
    fn test_observe_debounces_to_confirmed() {
        let mut checker = AwakenessChecker::new(
            Box::new(ScriptedDetector {
                outcome: face_at_eyes,
            }),
            90.0,
            3,
        )
        .unwrap();

        let bright = frame_with_eyes(180);
        assert_eq!(
            checker.observe(&bright),
            AwakenessState::Accumulating { count: 1 }
        );
        assert_eq!(
            checker.observe(&bright),
            AwakenessState::Accumulating { count: 2 }
        );
        assert_eq!(
            checker.observe(&bright),
            AwakenessState::Confirmed { count: 3 }
        );
    }

    #[test]
    fn test_dark_frame_resets_streak() {
        let mut checker = AwakenessChecker::new(
            Box::new(ScriptedDetector {
                outcome: face_at_eyes,
            }),
            90.0,
            3,
        )
        .unwrap();

        let bright = frame_with_eyes(180);
        checker.observe(&bright);
        checker.observe(&bright);
        assert_eq!(checker.observe(&frame_with_eyes(40)), AwakenessState::Idle);
        assert_eq!(checker.session().count(), 0);
    }

    #[test]
    fn test_constructor_rejects_bad_parameters() {
        let make = |threshold, required| {
            AwakenessChecker::new(
                Box::new(ScriptedDetector {
                    outcome: face_at_eyes,
                }),
                threshold,
                required,
            )
        };

        assert!(matches!(make(300.0, 3), Err(Error::InvalidParameter(_))));
        assert!(matches!(make(90.0, 0), Err(Error::InvalidParameter(_))));
    }
}
