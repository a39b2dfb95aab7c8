//! Consecutive-frame awakeness confirmation.
//!
//! A single awake-looking frame can be a blink artifact or a detector
//! glitch, so the verdict is debounced: only N consecutive positive frames
//! confirm the subject awake, and any negative or faulty frame restarts the
//! count from zero.

use serde::Serialize;

use crate::error::{Error, Result};

/// Debounce state derived from the consecutive counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AwakenessState {
    /// No accumulation in progress.
    Idle,
    /// Some positive frames seen, fewer than required.
    Accumulating {
        /// Consecutive positive frames so far.
        count: u32,
    },
    /// The required streak was reached.
    ///
    /// Not sticky: the very next frame re-evaluates, so callers wanting a
    /// one-shot signal observe the transition into this state.
    Confirmed {
        /// Consecutive positive frames so far.
        count: u32,
    },
}

/// Per-session debounce counter for awakeness verdicts.
#[derive(Debug, Clone)]
pub struct AwakenessSession {
    required: u32,
    count: u32,
}

impl AwakenessSession {
    /// Creates a session requiring `required` consecutive positive frames.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when `required` is zero.
    pub fn new(required: u32) -> Result<Self> {
        validate_required(required)?;
        Ok(Self { required, count: 0 })
    }

    /// Feeds one per-frame verdict and returns the resulting state.
    pub fn observe(&mut self, awake: bool) -> AwakenessState {
        if awake {
            self.count += 1;
        } else {
            self.count = 0;
        }
        self.state()
    }

    /// Current state without feeding a verdict.
    #[must_use]
    pub const fn state(&self) -> AwakenessState {
        if self.count == 0 {
            AwakenessState::Idle
        } else if self.count >= self.required {
            AwakenessState::Confirmed { count: self.count }
        } else {
            AwakenessState::Accumulating { count: self.count }
        }
    }

    /// Consecutive positive frames seen so far.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Required streak length.
    #[must_use]
    pub const fn required(&self) -> u32 {
        self.required
    }

    /// Whether the required streak has been reached.
    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        self.count >= self.required
    }

    /// Returns the session to `Idle` with a zero count.
    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Changes the required streak length.
    ///
    /// Resets the counter: raising or lowering the bar invalidates any
    /// in-flight accumulation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when `required` is zero.
    pub fn set_required(&mut self, required: u32) -> Result<()> {
        validate_required(required)?;
        self.required = required;
        self.count = 0;
        Ok(())
    }
}

fn validate_required(required: u32) -> Result<()> {
    if required == 0 {
        return Err(Error::InvalidParameter(
            "consecutive frames required must be >= 1, got 0".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_at_least_one_frame() {
        assert!(matches!(
            AwakenessSession::new(0),
            Err(Error::InvalidParameter(_))
        ));
        assert!(AwakenessSession::new(1).is_ok());
    }

    #[test]
    fn test_three_positives_confirm() {
        let mut session = AwakenessSession::new(3).unwrap();

        assert_eq!(
            session.observe(true),
            AwakenessState::Accumulating { count: 1 }
        );
        assert_eq!(
            session.observe(true),
            AwakenessState::Accumulating { count: 2 }
        );
        assert_eq!(session.observe(true), AwakenessState::Confirmed { count: 3 });
        assert_eq!(session.count(), 3);
    }

    #[test]
    fn test_interrupted_streak_never_confirms() {
        let mut session = AwakenessSession::new(3).unwrap();

        for verdict in [true, true, false, true, true] {
            let state = session.observe(verdict);
            assert!(
                !matches!(state, AwakenessState::Confirmed { .. }),
                "sequence must not confirm, got {state:?}"
            );
        }
        assert_eq!(session.count(), 2);
    }

    #[test]
    fn test_negative_frame_returns_to_idle() {
        let mut session = AwakenessSession::new(3).unwrap();
        session.observe(true);
        session.observe(true);

        assert_eq!(session.observe(false), AwakenessState::Idle);
        assert_eq!(session.count(), 0);
    }

    #[test]
    fn test_confirmed_is_not_sticky() {
        let mut session = AwakenessSession::new(2).unwrap();
        session.observe(true);
        assert!(matches!(
            session.observe(true),
            AwakenessState::Confirmed { .. }
        ));

        // The next negative frame drops straight back to Idle.
        assert_eq!(session.observe(false), AwakenessState::Idle);
        assert!(!session.is_confirmed());
    }

    #[test]
    fn test_count_grows_past_required() {
        let mut session = AwakenessSession::new(2).unwrap();
        for _ in 0..5 {
            session.observe(true);
        }
        assert_eq!(session.state(), AwakenessState::Confirmed { count: 5 });
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut session = AwakenessSession::new(3).unwrap();
        session.observe(true);
        session.observe(true);

        session.reset();
        assert_eq!(session.count(), 0);
        assert_eq!(session.state(), AwakenessState::Idle);

        session.reset();
        assert_eq!(session.count(), 0);
        assert_eq!(session.state(), AwakenessState::Idle);
    }

    #[test]
    fn test_set_required_resets_count() {
        let mut session = AwakenessSession::new(3).unwrap();
        session.observe(true);
        session.observe(true);

        session.set_required(2).unwrap();
        assert_eq!(session.count(), 0, "changing the bar resets accumulation");
        assert_eq!(session.required(), 2);

        assert!(matches!(session.set_required(0), Err(Error::InvalidParameter(_))));
        assert_eq!(session.required(), 2, "failed update leaves requirement");
    }

    #[test]
    fn test_required_one_confirms_immediately() {
        let mut session = AwakenessSession::new(1).unwrap();
        assert_eq!(session.observe(true), AwakenessState::Confirmed { count: 1 });
    }
}
