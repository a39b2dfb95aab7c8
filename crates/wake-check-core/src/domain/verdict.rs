//! Per-frame eye verdict types.

use serde::{Deserialize, Serialize};

/// Verdict for a single eye.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyeVerdict {
    /// Mean region luminance on the 0-255 scale.
    pub brightness: f64,
    /// Whether the brightness strictly exceeded the threshold.
    pub is_open: bool,
}

impl EyeVerdict {
    /// A closed-eye placeholder used when analysis of that eye failed.
    #[must_use]
    pub const fn failed() -> Self {
        Self {
            brightness: 0.0,
            is_open: false,
        }
    }
}

/// Combined verdict for both eyes of the detected face.
///
/// When `successful` is false, `both_open` is always false: a partially
/// analyzed face is never trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualEyeResult {
    /// Left eye verdict.
    pub left: EyeVerdict,
    /// Right eye verdict.
    pub right: EyeVerdict,
    /// Strict conjunction of the per-eye verdicts.
    pub both_open: bool,
    /// Whether both eyes were sampled and classified without error.
    pub successful: bool,
    /// Description of the failure, naming which eye failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DualEyeResult {
    /// Builds a successful result from two per-eye verdicts.
    #[must_use]
    pub fn success(left: EyeVerdict, right: EyeVerdict) -> Self {
        Self {
            both_open: left.is_open && right.is_open,
            left,
            right,
            successful: true,
            error: None,
        }
    }

    /// Builds an unsuccessful result carrying the failure description.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            left: EyeVerdict::failed(),
            right: EyeVerdict::failed(),
            both_open: false,
            successful: false,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_conjunction() {
        let open = EyeVerdict {
            brightness: 120.0,
            is_open: true,
        };
        let closed = EyeVerdict {
            brightness: 40.0,
            is_open: false,
        };

        assert!(DualEyeResult::success(open, open).both_open);
        assert!(!DualEyeResult::success(open, closed).both_open);
        assert!(!DualEyeResult::success(closed, open).both_open);
        assert!(!DualEyeResult::success(closed, closed).both_open);
    }

    #[test]
    fn test_failure_is_never_open() {
        let result = DualEyeResult::failure("left eye analysis failed");
        assert!(!result.both_open);
        assert!(!result.successful);
        assert!(result.error.is_some());
    }
}
