//! Synthetic face-frame builders for testing.

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use wake_check_core::domain::{BoundingBox, FaceDetection, FaceKeypoints, Frame, Point2D};

/// Frame width of the standard synthetic face.
pub const FRAME_WIDTH: u32 = 200;
/// Frame height of the standard synthetic face.
pub const FRAME_HEIGHT: u32 = 160;

/// Standard left eye center of the synthetic face.
pub const LEFT_EYE: Point2D = Point2D::new(60.0, 80.0);
/// Standard right eye center of the synthetic face.
pub const RIGHT_EYE: Point2D = Point2D::new(140.0, 80.0);

/// Half-width of an eye patch; covers the default 30x20 sampling region.
const PATCH_HALF_WIDTH: i32 = 15;
/// Half-height of an eye patch.
const PATCH_HALF_HEIGHT: i32 = 10;

/// Luminance of the non-eye face area.
const FACE_VALUE: u8 = 25;

/// Builder for synthetic frames with controllable eye-patch luminance.
///
/// Frames place two rectangular patches exactly under the default sampling
/// regions at [`LEFT_EYE`] and [`RIGHT_EYE`], so the measured brightness of
/// each eye equals the requested patch value.
pub struct SyntheticFaceBuilder;

impl SyntheticFaceBuilder {
    /// Creates a grayscale frame with independent per-eye patch luminance.
    #[must_use]
    pub fn face_frame(left_value: u8, right_value: u8) -> Frame {
        let img = GrayImage::from_fn(FRAME_WIDTH, FRAME_HEIGHT, |x, y| {
            match eye_at(x, y) {
                Some(Eye::Left) => Luma([left_value]),
                Some(Eye::Right) => Luma([right_value]),
                None => Luma([FACE_VALUE]),
            }
        });
        Frame::new("synthetic://face", DynamicImage::ImageLuma8(img))
    }

    /// Creates an RGB frame with independent per-eye patch luminance.
    ///
    /// Patches are neutral gray so the perceptual luma equals the value.
    #[must_use]
    pub fn rgb_face_frame(left_value: u8, right_value: u8) -> Frame {
        let img = RgbImage::from_fn(FRAME_WIDTH, FRAME_HEIGHT, |x, y| {
            let v = match eye_at(x, y) {
                Some(Eye::Left) => left_value,
                Some(Eye::Right) => right_value,
                None => FACE_VALUE,
            };
            Rgb([v, v, v])
        });
        Frame::new("synthetic://face_rgb", DynamicImage::ImageRgb8(img))
    }

    /// Both eye patches bright: reads as awake at the default threshold.
    #[must_use]
    pub fn awake_frame() -> Frame {
        Self::face_frame(180, 180)
    }

    /// Both eye patches dark: reads as not awake.
    #[must_use]
    pub fn sleepy_frame() -> Frame {
        Self::face_frame(40, 40)
    }

    /// One bright and one dark eye: never both-eyes-open.
    #[must_use]
    pub fn winking_frame() -> Frame {
        Self::face_frame(180, 40)
    }

    /// The five keypoints of the standard synthetic face.
    #[must_use]
    pub fn keypoints() -> FaceKeypoints {
        FaceKeypoints {
            left_eye: LEFT_EYE,
            right_eye: RIGHT_EYE,
            nose: Point2D::new(100.0, 100.0),
            mouth_left: Point2D::new(70.0, 130.0),
            mouth_right: Point2D::new(130.0, 130.0),
        }
    }

    /// A detection matching the standard synthetic face.
    #[must_use]
    pub fn detection() -> FaceDetection {
        FaceDetection {
            bounding_box: BoundingBox {
                x: 30.0,
                y: 30.0,
                width: 140.0,
                height: 120.0,
            },
            confidence: 0.95,
            keypoints: Self::keypoints(),
        }
    }
}

enum Eye {
    Left,
    Right,
}

#[allow(clippy::cast_possible_wrap)]
fn eye_at(x: u32, y: u32) -> Option<Eye> {
    let near = |center: Point2D| {
        let dx = (x as i32 - center.x as i32).abs();
        let dy = (y as i32 - center.y as i32).abs();
        dx <= PATCH_HALF_WIDTH && dy <= PATCH_HALF_HEIGHT
    };

    if near(LEFT_EYE) {
        Some(Eye::Left)
    } else if near(RIGHT_EYE) {
        Some(Eye::Right)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wake_check_core::{EyeAnalyzer, RegionSize};

    #[test]
    fn test_patch_fills_sampling_region() {
        let frame = SyntheticFaceBuilder::face_frame(150, 60);
        let analyzer = EyeAnalyzer::new(90.0, RegionSize::default()).unwrap();

        let left = analyzer
            .sample_brightness(&frame.image, LEFT_EYE)
            .expect("left eye samples");
        let right = analyzer
            .sample_brightness(&frame.image, RIGHT_EYE)
            .expect("right eye samples");

        assert!((left - 150.0).abs() < 1e-9, "left patch value, got {left}");
        assert!((right - 60.0).abs() < 1e-9, "right patch value, got {right}");
    }

    #[test]
    fn test_rgb_patch_luma_matches_value() {
        let frame = SyntheticFaceBuilder::rgb_face_frame(150, 150);
        let analyzer = EyeAnalyzer::new(90.0, RegionSize::default()).unwrap();

        let left = analyzer
            .sample_brightness(&frame.image, LEFT_EYE)
            .expect("left eye samples");
        // Neutral gray keeps luma within rounding of the channel value.
        assert!((left - 150.0).abs() <= 1.0, "got {left}");
    }

    #[test]
    fn test_standard_frames() {
        let analyzer = EyeAnalyzer::new(90.0, RegionSize::default()).unwrap();
        let kp = SyntheticFaceBuilder::keypoints();

        let awake = SyntheticFaceBuilder::awake_frame();
        let result = analyzer.analyze_both(&awake.image, kp.left_eye, kp.right_eye);
        assert!(result.both_open);

        let sleepy = SyntheticFaceBuilder::sleepy_frame();
        let result = analyzer.analyze_both(&sleepy.image, kp.left_eye, kp.right_eye);
        assert!(!result.both_open);

        let winking = SyntheticFaceBuilder::winking_frame();
        let result = analyzer.analyze_both(&winking.image, kp.left_eye, kp.right_eye);
        assert!(result.successful);
        assert!(!result.both_open);
    }
}
