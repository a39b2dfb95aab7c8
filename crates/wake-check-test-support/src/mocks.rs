//! Mock implementations of the core port traits.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use image::DynamicImage;
use wake_check_core::domain::{FaceDetection, Frame};
use wake_check_core::ports::{FaceDetector, FrameSource};
use wake_check_core::{Error, Result};

/// One scripted detector outcome.
#[derive(Debug, Clone)]
pub enum MockDetection {
    /// A single face with the given detection.
    Face(FaceDetection),
    /// Zero or multiple faces were "found".
    Ambiguous(usize),
    /// The backend "failed" with the given message.
    Failure(String),
}

impl MockDetection {
    fn into_result(self) -> Result<FaceDetection> {
        match self {
            Self::Face(detection) => Ok(detection),
            Self::Ambiguous(found) => Err(Error::DetectionAmbiguous { found }),
            Self::Failure(message) => Err(Error::Detector(anyhow::anyhow!(message))),
        }
    }
}

/// Mock implementation of `FaceDetector` for testing.
///
/// Plays back a script of outcomes; once the script is exhausted the last
/// outcome repeats. Tracks calls for assertions.
pub struct MockFaceDetector {
    script: Mutex<VecDeque<MockDetection>>,
    last: MockDetection,
    calls: Mutex<usize>,
}

impl MockFaceDetector {
    /// Creates a detector playing back `outcomes` in order, repeating the
    /// final one afterwards.
    ///
    /// # Panics
    ///
    /// Panics when `outcomes` is empty.
    #[must_use]
    pub fn scripted(outcomes: Vec<MockDetection>) -> Self {
        assert!(!outcomes.is_empty(), "script needs at least one outcome");
        let last = outcomes
            .last()
            .cloned()
            .expect("non-empty script has a last outcome");
        Self {
            script: Mutex::new(outcomes.into()),
            last,
            calls: Mutex::new(0),
        }
    }

    /// A detector that always finds the given face.
    #[must_use]
    pub fn always(detection: FaceDetection) -> Self {
        Self::scripted(vec![MockDetection::Face(detection)])
    }

    /// A detector that always reports `found` faces (zero or many).
    #[must_use]
    pub fn always_ambiguous(found: usize) -> Self {
        Self::scripted(vec![MockDetection::Ambiguous(found)])
    }

    /// Number of `detect` calls made so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FaceDetector for MockFaceDetector {
    fn detect(&self, _frame: &DynamicImage) -> Result<FaceDetection> {
        *self.calls.lock().unwrap_or_else(PoisonError::into_inner) += 1;

        let next = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| self.last.clone());
        next.into_result()
    }
}

/// Mock implementation of `FrameSource` yielding pre-built frames.
pub struct MockFrameSource {
    frames: VecDeque<Frame>,
}

impl MockFrameSource {
    /// Creates a source yielding the given frames in order, then ending.
    #[must_use]
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames: frames.into(),
        }
    }

    /// Creates a source that ends immediately.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Creates a source yielding `count` clones of one frame.
    #[must_use]
    pub fn repeating(frame: &Frame, count: usize) -> Self {
        Self::new((0..count).map(|_| frame.clone()).collect())
    }

    /// Frames not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for MockFrameSource {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        Ok(self.frames.pop_front())
    }

    fn frame_hint(&self) -> Option<usize> {
        Some(self.frames.len())
    }
}
