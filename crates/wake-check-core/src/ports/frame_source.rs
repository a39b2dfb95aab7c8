//! Frame source port.

use crate::domain::Frame;
use crate::error::Result;

/// Port for pulling frames into the pipeline.
///
/// One frame is fully processed before the next is requested; sources need
/// not buffer. Color frames must be delivered in RGB channel order. The call
/// may block on capture or decode; the core imposes no timeout of its own.
pub trait FrameSource: Send {
    /// Pulls the next frame, or `None` when the source is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FrameSource`] when a frame cannot be produced.
    fn next_frame(&mut self) -> Result<Option<Frame>>;

    /// Total number of frames, when known up front.
    fn frame_hint(&self) -> Option<usize> {
        None
    }
}
