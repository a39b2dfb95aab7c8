//! File-backed calibration store.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};
use wake_check_core::calibration::{CalibrationRecord, DEFAULT_THRESHOLD};

/// Calibration store backed by a human-readable key/value file.
///
/// The store is process-wide state in spirit — read at startup, written only
/// at the end of a successful calibration run, last writer wins. The path is
/// chosen once and threaded through constructors rather than looked up
/// ambiently.
pub struct FsCalibrationStore {
    path: PathBuf,
}

impl FsCalibrationStore {
    /// Creates a store at the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the default location.
    #[must_use]
    pub fn at_default() -> Self {
        Self::new(default_store_path())
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored calibration record.
    ///
    /// A missing store is `Ok(None)`; an unreadable or unparseable store is
    /// an error so `status` can report it.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<CalibrationRecord>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read calibration store {}", self.path.display()))?;
        let record = CalibrationRecord::parse(&text)
            .with_context(|| format!("failed to parse calibration store {}", self.path.display()))?;
        Ok(Some(record))
    }

    /// Loads the calibrated threshold, falling back to the default.
    ///
    /// Never fails: a missing store, a missing `threshold` key, or an
    /// unreadable store all fall back to [`DEFAULT_THRESHOLD`] with a log
    /// line, so the live-check path always has a usable cutoff.
    #[must_use]
    pub fn load_threshold(&self) -> f64 {
        match self.load() {
            Ok(Some(record)) => {
                let threshold = record.threshold_or_default();
                if record.threshold.is_some() {
                    info!("using calibrated brightness threshold {threshold}");
                } else {
                    info!(
                        "calibration store has no threshold key, using default {DEFAULT_THRESHOLD}"
                    );
                }
                threshold
            }
            Ok(None) => {
                info!("no calibration found, using default threshold {DEFAULT_THRESHOLD}");
                DEFAULT_THRESHOLD
            }
            Err(e) => {
                warn!("unreadable calibration store ({e:#}), using default threshold");
                DEFAULT_THRESHOLD
            }
        }
    }

    /// Persists a calibration record, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error when the parent directory cannot be created or the
    /// file cannot be written.
    pub fn save(&self, record: &CalibrationRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create config directory {}", parent.display())
            })?;
        }

        std::fs::write(&self.path, record.render())
            .with_context(|| format!("failed to write calibration store {}", self.path.display()))?;
        info!("calibration saved to {}", self.path.display());
        Ok(())
    }
}

/// Default store location: `<config dir>/wake-check/calibration.toml`.
#[must_use]
pub fn default_store_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wake-check")
        .join("calibration.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wake_check_core::calibration::CalibrationResult;

    fn store_in(dir: &tempfile::TempDir) -> FsCalibrationStore {
        FsCalibrationStore::new(dir.path().join("calibration.toml"))
    }

    fn sample_record() -> CalibrationRecord {
        let result = CalibrationResult::from_samples(&vec![150.0; 10], &vec![60.0; 10])
            .expect("fit should succeed");
        CalibrationRecord::from_result(&result)
    }

    #[test]
    fn test_missing_store_loads_none_and_default_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.load().unwrap().is_none());
        assert!((store.load_threshold() - DEFAULT_THRESHOLD).abs() < f64::EPSILON);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let record = sample_record();

        store.save(&record).unwrap();
        let loaded = store.load().unwrap().expect("stored record");

        assert_eq!(loaded.threshold, Some(100));
        assert_eq!(loaded, record);
        assert_eq!(loaded.is_valid(), record.is_valid());
        assert!((store.load_threshold() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsCalibrationStore::new(dir.path().join("nested/deeper/calibration.toml"));

        store.save(&sample_record()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_garbage_store_errors_but_threshold_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "threshold = = broken").unwrap();

        assert!(store.load().is_err());
        assert!((store.load_threshold() - DEFAULT_THRESHOLD).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_threshold_key_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "open_avg = 150.00\n").unwrap();

        assert!((store.load_threshold() - DEFAULT_THRESHOLD).abs() < f64::EPSILON);
    }

    #[test]
    fn test_save_overwrites_previous_calibration() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&sample_record()).unwrap();

        let newer = CalibrationResult::from_samples(&vec![180.0; 10], &vec![50.0; 10])
            .expect("fit should succeed");
        store.save(&CalibrationRecord::from_result(&newer)).unwrap();

        let loaded = store.load().unwrap().expect("stored record");
        assert_eq!(loaded.threshold, Some(i64::from(newer.threshold)));
    }
}
