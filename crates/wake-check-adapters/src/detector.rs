//! SCRFD five-keypoint face detector backend.
//!
//! Runs the insightface SCRFD-10G ONNX model: a three-scale anchor-based
//! detector whose per-anchor regressions carry a bounding box and the five
//! named facial keypoints (left eye, right eye, nose, mouth corners).

// Allow common ML/image code patterns
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, bail, Context, Result};
use image::DynamicImage;
use ndarray::Array4;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Tensor;
use tracing::debug;
use wake_check_core::domain::{BoundingBox, FaceDetection, FaceKeypoints, Point2D};
use wake_check_core::ports::FaceDetector;
use wake_check_core::Error;

/// Model input edge length.
pub const INPUT_SIZE: usize = 640;

/// Confidence threshold for face candidates.
const SCORE_THRESHOLD: f32 = 0.5;

/// Non-maximum suppression IOU threshold.
const NMS_THRESHOLD: f32 = 0.4;

/// Feature map strides; each carries its own score/bbox/keypoint outputs.
const STRIDES: [usize; 3] = [8, 16, 32];

/// Anchors per feature map cell.
const NUM_ANCHORS: usize = 2;

/// A decoded face candidate in model input coordinates.
#[derive(Debug, Clone)]
struct Candidate {
    /// `[x_min, y_min, x_max, y_max]`.
    bbox: [f32; 4],
    score: f32,
    /// Left eye, right eye, nose, mouth left, mouth right.
    keypoints: [[f32; 2]; 5],
}

/// ONNX-backed five-keypoint face detector.
pub struct ScrfdDetector {
    session: Mutex<Session>,
    input_name: String,
    output_names: Vec<String>,
}

impl ScrfdDetector {
    /// Loads the detector from an ONNX model file.
    ///
    /// # Errors
    ///
    /// Returns an error when the model cannot be loaded or does not have the
    /// expected three-scale output layout.
    pub fn from_file(path: &Path) -> Result<Self> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(2)?
            .commit_from_file(path)
            .with_context(|| format!("failed to load detector model {}", path.display()))?;

        let input_name = session
            .inputs()
            .first()
            .map(|i| i.name().to_string())
            .context("detector model has no inputs")?;

        let output_names: Vec<String> =
            session.outputs().iter().map(|o| o.name().to_string()).collect();
        if output_names.len() != STRIDES.len() * 3 {
            bail!(
                "unexpected detector model: expected {} outputs (scores/boxes/keypoints per \
                 stride), got {}",
                STRIDES.len() * 3,
                output_names.len()
            );
        }

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            output_names,
        })
    }

    /// Runs detection and returns all candidates in frame pixel coordinates.
    fn detect_faces(&self, image: &DynamicImage) -> Result<Vec<Candidate>> {
        let (input, scale) = preprocess(image);
        let tensor = Tensor::from_array(input)?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow!("detector session lock poisoned"))?;
        let outputs = session.run(ort::inputs![self.input_name.as_str() => tensor])?;

        let mut candidates = Vec::new();
        for (level, &stride) in STRIDES.iter().enumerate() {
            let (_, scores) = outputs[self.output_names[level].as_str()]
                .try_extract_tensor::<f32>()?;
            let (_, boxes) = outputs[self.output_names[level + STRIDES.len()].as_str()]
                .try_extract_tensor::<f32>()?;
            let (_, keypoints) = outputs[self.output_names[level + 2 * STRIDES.len()].as_str()]
                .try_extract_tensor::<f32>()?;

            decode_level(stride, scores, boxes, keypoints, &mut candidates)?;
        }

        let kept = nms(candidates);
        debug!("detector found {} faces", kept.len());

        // Back into original frame coordinates.
        Ok(kept
            .into_iter()
            .map(|c| Candidate {
                bbox: c.bbox.map(|v| v / scale),
                score: c.score,
                keypoints: c.keypoints.map(|p| p.map(|v| v / scale)),
            })
            .collect())
    }
}

impl FaceDetector for ScrfdDetector {
    fn detect(&self, frame: &DynamicImage) -> wake_check_core::Result<FaceDetection> {
        let candidates = self.detect_faces(frame).map_err(Error::Detector)?;

        let faces = candidates
            .into_iter()
            .map(|c| FaceDetection {
                bounding_box: BoundingBox {
                    x: c.bbox[0],
                    y: c.bbox[1],
                    width: c.bbox[2] - c.bbox[0],
                    height: c.bbox[3] - c.bbox[1],
                },
                confidence: c.score.clamp(0.0, 1.0),
                keypoints: FaceKeypoints {
                    left_eye: point(c.keypoints[0]),
                    right_eye: point(c.keypoints[1]),
                    nose: point(c.keypoints[2]),
                    mouth_left: point(c.keypoints[3]),
                    mouth_right: point(c.keypoints[4]),
                },
            })
            .collect();

        FaceDetection::exactly_one(faces)
    }
}

const fn point(xy: [f32; 2]) -> Point2D {
    Point2D::new(xy[0], xy[1])
}

/// Resizes the frame into the model's square input, top-left aligned.
///
/// Returns the input tensor and the scale that maps frame coordinates into
/// input coordinates (detections divide by it on the way back).
fn preprocess(image: &DynamicImage) -> (Array4<f32>, f32) {
    let (width, height) = (image.width(), image.height());
    let scale = INPUT_SIZE as f32 / width.max(height).max(1) as f32;

    let new_w = ((width as f32 * scale).round() as u32).clamp(1, INPUT_SIZE as u32);
    let new_h = ((height as f32 * scale).round() as u32).clamp(1, INPUT_SIZE as u32);

    let resized = image.resize_exact(new_w, new_h, image::imageops::FilterType::Triangle);
    let rgb = resized.to_rgb8();

    // Unfilled padding normalizes like black pixels.
    let mut input = Array4::from_elem((1, 3, INPUT_SIZE, INPUT_SIZE), -127.5 / 128.0);
    for (x, y, pixel) in rgb.enumerate_pixels() {
        for c in 0..3 {
            input[[0, c, y as usize, x as usize]] = (f32::from(pixel[c]) - 127.5) / 128.0;
        }
    }

    (input, scale)
}

/// Decodes one stride level's raw outputs into candidates.
///
/// Anchor centers sit on a `grid x grid` lattice spaced by the stride, with
/// [`NUM_ANCHORS`] anchors per cell. Box regressions are distances from the
/// center to each edge and keypoint regressions are center offsets, both in
/// stride units.
fn decode_level(
    stride: usize,
    scores: &[f32],
    boxes: &[f32],
    keypoints: &[f32],
    out: &mut Vec<Candidate>,
) -> Result<()> {
    let grid = INPUT_SIZE / stride;
    let anchors = grid * grid * NUM_ANCHORS;

    if scores.len() < anchors || boxes.len() < anchors * 4 || keypoints.len() < anchors * 10 {
        bail!(
            "detector output too small for stride {stride}: {} scores, {} box values, {} \
             keypoint values",
            scores.len(),
            boxes.len(),
            keypoints.len()
        );
    }

    let stride_f = stride as f32;
    for i in 0..anchors {
        let score = scores[i];
        if score < SCORE_THRESHOLD {
            continue;
        }

        let cell = i / NUM_ANCHORS;
        let cx = (cell % grid) as f32 * stride_f;
        let cy = (cell / grid) as f32 * stride_f;

        let b = &boxes[i * 4..i * 4 + 4];
        let bbox = [
            cx - b[0] * stride_f,
            cy - b[1] * stride_f,
            cx + b[2] * stride_f,
            cy + b[3] * stride_f,
        ];

        let mut kps = [[0.0f32; 2]; 5];
        for (k, kp) in kps.iter_mut().enumerate() {
            *kp = [
                cx + keypoints[i * 10 + k * 2] * stride_f,
                cy + keypoints[i * 10 + k * 2 + 1] * stride_f,
            ];
        }

        out.push(Candidate {
            bbox,
            score,
            keypoints: kps,
        });
    }

    Ok(())
}

/// Non-maximum suppression keeping the highest-scoring of overlapping boxes.
fn nms(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut keep = Vec::new();
    while !candidates.is_empty() {
        let best = candidates.remove(0);
        let bbox = best.bbox;
        keep.push(best);

        candidates.retain(|other| iou(&bbox, &other.bbox) < NMS_THRESHOLD);
    }

    keep
}

/// Intersection over union for two `[x1, y1, x2, y2]` boxes.
fn iou(a: &[f32; 4], b: &[f32; 4]) -> f32 {
    let x1 = a[0].max(b[0]);
    let y1 = a[1].max(b[1]);
    let x2 = a[2].min(b[2]);
    let y2 = a[3].min(b[3]);

    let intersection = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);

    let area_a = (a[2] - a[0]) * (a[3] - a[1]);
    let area_b = (b[2] - b[0]) * (b[3] - b[1]);

    let union = area_a + area_b - intersection;

    if union > 0.0 {
        intersection / union
    } else {
        0.0
    }
}
