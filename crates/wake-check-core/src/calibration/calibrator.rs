//! Two-phase calibration protocol over the detector and frame-source ports.

use tracing::{debug, info};

use crate::analysis::EyeAnalyzer;
use crate::domain::RegionSize;
use crate::error::{Error, Result};
use crate::ports::{FaceDetector, FrameSource};

use super::file::DEFAULT_THRESHOLD;
use super::result::CalibrationResult;

/// Default number of successful frames each phase collects.
pub const DEFAULT_TARGET_FRAMES: u32 = 10;

/// Runs paired open-eye / closed-eye sampling sessions and fits a
/// personalized brightness cutoff.
///
/// Each phase pulls frames until `target_frames` of them have contributed
/// exactly two brightness samples (left and right eye) to the phase's set.
/// Frames where detection or sampling fails are skipped and do not count
/// toward the target.
pub struct ThresholdCalibrator {
    analyzer: EyeAnalyzer,
    target_frames: u32,
}

impl ThresholdCalibrator {
    /// Creates a calibrator collecting `target_frames` frames per phase.
    ///
    /// The internal analyzer runs at the neutral default threshold; only raw
    /// brightness values are collected during calibration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when `target_frames` is zero.
    pub fn new(target_frames: u32) -> Result<Self> {
        if target_frames == 0 {
            return Err(Error::InvalidParameter(
                "calibration frame target must be >= 1, got 0".into(),
            ));
        }
        Ok(Self {
            analyzer: EyeAnalyzer::with_default_region(DEFAULT_THRESHOLD)?,
            target_frames,
        })
    }

    /// Overrides the eye region size sampled during calibration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when either dimension is zero.
    pub fn with_region_size(mut self, region_size: RegionSize) -> Result<Self> {
        self.analyzer.set_region_size(region_size)?;
        Ok(self)
    }

    /// Frames collected per phase.
    #[must_use]
    pub const fn target_frames(&self) -> u32 {
        self.target_frames
    }

    /// Collects one phase's brightness samples.
    ///
    /// Pulls frames until the target is met or the source ends. Each
    /// successful frame contributes its left and right eye brightness as a
    /// pair; failed frames are skipped. An early-ending source is not an
    /// error here — the sample floor is enforced when fitting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameSource`] when the source itself fails.
    pub fn collect_phase(
        &self,
        detector: &dyn FaceDetector,
        source: &mut dyn FrameSource,
    ) -> Result<Vec<f64>> {
        let mut samples = Vec::with_capacity(self.target_frames as usize * 2);
        let mut captured = 0u32;

        while captured < self.target_frames {
            let Some(frame) = source.next_frame()? else {
                debug!("frame source exhausted after {captured} captured frames");
                break;
            };

            let face = match detector.detect(&frame.image) {
                Ok(face) => face,
                Err(e) => {
                    debug!("skipping frame {}: {e}", frame.origin);
                    continue;
                }
            };

            // Both eyes must sample; a half-sampled frame contributes nothing.
            let left = self
                .analyzer
                .sample_brightness(&frame.image, face.keypoints.left_eye);
            let right = self
                .analyzer
                .sample_brightness(&frame.image, face.keypoints.right_eye);

            match (left, right) {
                (Ok(left), Ok(right)) => {
                    samples.push(left);
                    samples.push(right);
                    captured += 1;
                }
                (Err(e), _) | (_, Err(e)) => {
                    debug!("skipping frame {}: {e}", frame.origin);
                }
            }
        }

        Ok(samples)
    }

    /// Runs both phases and fits the threshold.
    ///
    /// Phase order is fixed: eyes open first, then eyes closed. Any failure
    /// leaves previously persisted calibration state untouched, because
    /// persistence is the caller's final step after a successful fit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameSource`] on source faults and
    /// [`Error::InsufficientData`] when a phase collected fewer than the
    /// minimum samples.
    pub fn run(
        &self,
        detector: &dyn FaceDetector,
        open_source: &mut dyn FrameSource,
        closed_source: &mut dyn FrameSource,
    ) -> Result<CalibrationResult> {
        info!(
            "calibration phase 1: eyes open, collecting {} frames",
            self.target_frames
        );
        let open = self.collect_phase(detector, open_source)?;
        info!("collected {} open-eye brightness samples", open.len());

        info!(
            "calibration phase 2: eyes closed, collecting {} frames",
            self.target_frames
        );
        let closed = self.collect_phase(detector, closed_source)?;
        info!("collected {} closed-eye brightness samples", closed.len());

        let result = CalibrationResult::from_samples(&open, &closed)?;
        info!(
            "calibrated threshold {} (open {:.1}, closed {:.1}, separation {:.1}, {})",
            result.threshold,
            result.open_mean,
            result.closed_mean,
            result.separation,
            result.quality()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use image::{DynamicImage, GrayImage, Luma};

    use super::*;
    use crate::domain::{BoundingBox, FaceDetection, FaceKeypoints, Frame, Point2D};

    const LEFT_EYE: Point2D = Point2D::new(60.0, 80.0);
    const RIGHT_EYE: Point2D = Point2D::new(140.0, 80.0);

    /// Frame whose eye patches carry a fixed luminance over a dark face.
    fn eye_frame(eye_value: u8) -> Frame {
        let img = GrayImage::from_fn(200, 160, |x, y| {
            let near = |cx: i32, cy: i32| {
                #[allow(clippy::cast_possible_wrap)]
                let (dx, dy) = ((x as i32 - cx).abs(), (y as i32 - cy).abs());
                dx <= 15 && dy <= 10
            };
            if near(60, 80) || near(140, 80) {
                Luma([eye_value])
            } else {
                Luma([25u8])
            }
        });
        Frame::new("synthetic://calibration", DynamicImage::ImageLuma8(img))
    }

    struct VecSource {
        frames: Vec<Frame>,
    }

    impl VecSource {
        fn of(eye_value: u8, count: usize) -> Self {
            Self {
                frames: (0..count).map(|_| eye_frame(eye_value)).collect(),
            }
        }
    }

    impl FrameSource for VecSource {
        fn next_frame(&mut self) -> Result<Option<Frame>> {
            if self.frames.is_empty() {
                Ok(None)
            } else {
                Ok(Some(self.frames.remove(0)))
            }
        }
    }

    /// Detector that always finds one face at the fixed eye positions.
    struct FixedDetector;

    impl FaceDetector for FixedDetector {
        fn detect(&self, _frame: &DynamicImage) -> Result<FaceDetection> {
            Ok(FaceDetection {
                bounding_box: BoundingBox {
                    x: 20.0,
                    y: 20.0,
                    width: 160.0,
                    height: 120.0,
                },
                confidence: 0.93,
                keypoints: FaceKeypoints {
                    left_eye: LEFT_EYE,
                    right_eye: RIGHT_EYE,
                    nose: Point2D::new(100.0, 100.0),
                    mouth_left: Point2D::new(70.0, 130.0),
                    mouth_right: Point2D::new(130.0, 130.0),
                },
            })
        }
    }

    /// Detector that fails on every other call.
    struct FlakyDetector {
        calls: AtomicUsize,
    }

    impl FaceDetector for FlakyDetector {
        fn detect(&self, _frame: &DynamicImage) -> Result<FaceDetection> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call % 2 == 0 {
                Err(Error::DetectionAmbiguous { found: 0 })
            } else {
                FixedDetector.detect(_frame)
            }
        }
    }

    #[test]
    fn test_rejects_zero_frame_target() {
        assert!(matches!(
            ThresholdCalibrator::new(0),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_phase_collects_two_samples_per_frame() {
        let calibrator = ThresholdCalibrator::new(4).unwrap();
        let mut source = VecSource::of(150, 10);

        let samples = calibrator
            .collect_phase(&FixedDetector, &mut source)
            .unwrap();

        assert_eq!(samples.len(), 8, "4 frames x 2 eyes");
        assert!(samples.iter().all(|&b| (b - 150.0).abs() < 1.0));
        // Frames beyond the target are left in the source.
        assert_eq!(source.frames.len(), 6);
    }

    #[test]
    fn test_failed_detections_do_not_count() {
        let calibrator = ThresholdCalibrator::new(3).unwrap();
        let detector = FlakyDetector {
            calls: AtomicUsize::new(0),
        };
        let mut source = VecSource::of(150, 10);

        let samples = calibrator.collect_phase(&detector, &mut source).unwrap();

        // Every other frame is skipped, so 6 frames were consumed for 3 hits.
        assert_eq!(samples.len(), 6);
        assert_eq!(source.frames.len(), 4);
    }

    #[test]
    fn test_exhausted_source_stops_short() {
        let calibrator = ThresholdCalibrator::new(10).unwrap();
        let mut source = VecSource::of(150, 2);

        let samples = calibrator
            .collect_phase(&FixedDetector, &mut source)
            .unwrap();
        assert_eq!(samples.len(), 4);
    }

    #[test]
    fn test_run_fits_expected_threshold() {
        let calibrator = ThresholdCalibrator::new(5).unwrap();
        let mut open = VecSource::of(150, 5);
        let mut closed = VecSource::of(60, 5);

        let result = calibrator
            .run(&FixedDetector, &mut open, &mut closed)
            .unwrap();

        assert_eq!(result.threshold, 100);
        assert_eq!(
            result.quality(),
            crate::calibration::SeparationQuality::Excellent
        );
    }

    #[test]
    fn test_run_fails_on_insufficient_open_phase() {
        let calibrator = ThresholdCalibrator::new(10).unwrap();
        // Two successful open frames = 4 samples, below the floor of 5.
        let mut open = VecSource::of(150, 2);
        let mut closed = VecSource::of(60, 10);

        let err = calibrator
            .run(&FixedDetector, &mut open, &mut closed)
            .unwrap_err();
        assert!(matches!(err, Error::InsufficientData { open: 4, .. }));
    }

    #[test]
    fn test_three_successful_frames_meet_the_floor() {
        // 3 frames x 2 eyes = 6 samples >= 5: the loose floor is intentional.
        let calibrator = ThresholdCalibrator::new(10).unwrap();
        let mut open = VecSource::of(150, 3);
        let mut closed = VecSource::of(60, 3);

        assert!(calibrator
            .run(&FixedDetector, &mut open, &mut closed)
            .is_ok());
    }
}
