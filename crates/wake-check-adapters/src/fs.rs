//! Filesystem frame source.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use wake_check_core::domain::Frame;
use wake_check_core::ports::FrameSource;
use wake_check_core::{Error, Result};

/// Supported frame image extensions.
const FRAME_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tiff", "tif", "webp", "bmp"];

/// Frame source yielding decoded image files in sorted order.
///
/// Stands in for a camera during one-shot checks, file-based monitoring, and
/// calibration: each image file is one frame, delivered in lexicographic
/// path order so frame sequences replay deterministically. Decoding produces
/// RGB channel order, the pipeline's canonical order.
pub struct FsFrameSource {
    files: Vec<PathBuf>,
    next: usize,
}

impl FsFrameSource {
    /// Creates a source over the given files and directories.
    ///
    /// Directories are scanned for supported image files, recursing when
    /// `recursive` is set. Unsupported and missing paths are warned about
    /// and skipped.
    #[must_use]
    pub fn new(paths: &[PathBuf], recursive: bool) -> Self {
        let mut files = Vec::new();

        for path in paths {
            if path.is_file() {
                if is_supported_frame(path) {
                    files.push(path.clone());
                } else {
                    warn!("Unsupported file type: {}", path.display());
                }
            } else if path.is_dir() {
                collect_from_dir(path, recursive, &mut files);
            } else {
                warn!("Path does not exist: {}", path.display());
            }
        }

        files.sort();
        debug!("Found {} frame files", files.len());

        Self { files, next: 0 }
    }
}

impl FrameSource for FsFrameSource {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        let Some(path) = self.files.get(self.next) else {
            return Ok(None);
        };
        self.next += 1;

        let image = image::open(path).map_err(|e| {
            Error::FrameSource(anyhow::anyhow!(
                "failed to decode frame {}: {e}",
                path.display()
            ))
        })?;

        Ok(Some(Frame::new(path.to_string_lossy(), image)))
    }

    fn frame_hint(&self) -> Option<usize> {
        Some(self.files.len() - self.next)
    }
}

fn collect_from_dir(dir: &Path, recursive: bool, files: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            warn!("Failed to read directory {}: {e}", dir.display());
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_file() && is_supported_frame(&path) {
            files.push(path);
        } else if path.is_dir() && recursive {
            collect_from_dir(&path, recursive, files);
        }
    }
}

/// Checks whether a path has a supported frame extension.
fn is_supported_frame(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| FRAME_EXTENSIONS.contains(&e.as_str()))
}
