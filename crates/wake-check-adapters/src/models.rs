//! Detector model distribution: download, caching, and integrity checks.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

/// Model file descriptor: URL, expected filename, SHA-256 checksum.
#[derive(Debug, Clone)]
pub struct ModelInfo {
    /// Model name/identifier.
    pub name: &'static str,
    /// Download URL.
    pub url: &'static str,
    /// Expected SHA-256 hex digest.
    pub sha256: &'static str,
    /// Filename in the models directory.
    pub filename: &'static str,
}

/// The five-keypoint face detector model (SCRFD-10G from the insightface
/// buffalo_l bundle).
// Checksum verified from the HuggingFace Git LFS pointer file (oid sha256:).
pub const DETECTOR_MODEL: ModelInfo = ModelInfo {
    name: "scrfd-10g",
    url: "https://huggingface.co/public-data/insightface/resolve/main/models/buffalo_l/det_10g.onnx",
    sha256: "5838f7fe053675b1c7a08b633df49e7af5495cee0493c7dcf6697200b85b5b91",
    filename: "det_10g.onnx",
};

/// Default models directory: `<data dir>/wake-check/models`.
#[must_use]
pub fn models_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wake-check")
        .join("models")
}

/// Resolves the detector model path, honoring an explicit directory override.
#[must_use]
pub fn detector_model_path(models_dir_override: Option<&Path>) -> PathBuf {
    models_dir_override
        .map_or_else(models_dir, Path::to_path_buf)
        .join(DETECTOR_MODEL.filename)
}

/// Ensures the detector model is present and intact, downloading if needed.
///
/// # Errors
///
/// Returns an error when the download fails or the checksum does not match.
pub fn ensure_detector_model(models_dir_override: Option<&Path>) -> Result<PathBuf> {
    let path = detector_model_path(models_dir_override);

    if path.exists() {
        debug!("model {} already present", path.display());
        verify_model(&path, DETECTOR_MODEL.sha256)?;
        return Ok(path);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create models directory {}", parent.display()))?;
    }

    info!(
        "downloading {} from {}",
        DETECTOR_MODEL.name, DETECTOR_MODEL.url
    );
    download_to(DETECTOR_MODEL.url, &path)?;
    verify_model(&path, DETECTOR_MODEL.sha256)?;
    info!("model saved to {}", path.display());

    Ok(path)
}

/// Downloads a URL to a file, via a temporary sibling to avoid leaving a
/// truncated model behind.
fn download_to(url: &str, dest: &Path) -> Result<()> {
    let tmp = dest.with_extension("download");

    let mut response = ureq::get(url)
        .call()
        .with_context(|| format!("failed to fetch {url}"))?;

    let mut file = fs::File::create(&tmp)
        .with_context(|| format!("failed to create {}", tmp.display()))?;
    std::io::copy(&mut response.body_mut().as_reader(), &mut file)
        .with_context(|| format!("failed to write {}", tmp.display()))?;

    fs::rename(&tmp, dest)
        .with_context(|| format!("failed to move model into place at {}", dest.display()))?;
    Ok(())
}

/// Computes the SHA-256 hex digest of a file.
///
/// # Errors
///
/// Returns an error when the file cannot be read.
pub fn sha256_file_hex(path: &Path) -> Result<String> {
    let mut file = fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];

    loop {
        let n = file
            .read(&mut buf)
            .with_context(|| format!("failed to read {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Verifies a model file against its expected checksum.
///
/// # Errors
///
/// Returns an error when the file is unreadable or the digest differs.
pub fn verify_model(path: &Path, expected_sha256: &str) -> Result<()> {
    let digest = sha256_file_hex(path)?;
    if digest != expected_sha256 {
        bail!(
            "model checksum mismatch for {}\n  expected: {expected_sha256}\n  got:      {digest}",
            path.display()
        );
    }
    Ok(())
}
