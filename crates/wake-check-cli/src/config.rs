//! Configuration file support for wake-check.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/wake-check/config.toml` (lowest priority)
//! - Project-local: `.wake-check.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Eye analysis settings.
    pub analysis: AnalysisConfig,
    /// Awakeness debounce settings.
    pub awakeness: AwakenessConfig,
    /// Calibration settings.
    pub calibration: CalibrationConfig,
    /// Model settings.
    pub models: ModelsConfig,
}

/// Eye analysis configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Brightness threshold override (0-255). When absent the calibrated
    /// value (or its default) is used.
    pub threshold: Option<f64>,
    /// Eye region width in pixels.
    pub region_width: Option<u32>,
    /// Eye region height in pixels.
    pub region_height: Option<u32>,
}

/// Awakeness debounce configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AwakenessConfig {
    /// Consecutive awake frames required for confirmation.
    pub required_frames: Option<u32>,
}

/// Calibration configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Successful frames collected per calibration phase.
    pub target_frames: Option<u32>,
    /// Calibration store file path.
    pub file: Option<PathBuf>,
}

/// Model configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    /// Custom models directory path.
    pub dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/wake-check/config.toml`
    /// 2. Project-local: `.wake-check.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as
    /// warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Load configuration from one explicit file, skipping the layering.
    pub fn load_from(path: &Path) -> Self {
        let config = load_file(path).unwrap_or_default();
        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }
        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        if let Some(t) = self.analysis.threshold {
            if !(0.0..=255.0).contains(&t) {
                return Err(format!("analysis.threshold must be 0-255, got {t}"));
            }
        }
        if let Some(w) = self.analysis.region_width {
            if w == 0 {
                return Err("analysis.region_width must be positive".into());
            }
        }
        if let Some(h) = self.analysis.region_height {
            if h == 0 {
                return Err("analysis.region_height must be positive".into());
            }
        }
        if let Some(n) = self.awakeness.required_frames {
            if n == 0 {
                return Err("awakeness.required_frames must be >= 1".into());
            }
        }
        if let Some(n) = self.calibration.target_frames {
            if n == 0 {
                return Err("calibration.target_frames must be >= 1".into());
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // Analysis
        self.analysis.threshold = other.analysis.threshold.or(self.analysis.threshold);
        self.analysis.region_width = other
            .analysis
            .region_width
            .or(self.analysis.region_width);
        self.analysis.region_height = other
            .analysis
            .region_height
            .or(self.analysis.region_height);

        // Awakeness
        self.awakeness.required_frames = other
            .awakeness
            .required_frames
            .or(self.awakeness.required_frames);

        // Calibration
        self.calibration.target_frames = other
            .calibration
            .target_frames
            .or(self.calibration.target_frames);
        self.calibration.file = other
            .calibration
            .file
            .or_else(|| self.calibration.file.take());

        // Models
        self.models.dir = other.models.dir.or_else(|| self.models.dir.take());
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("wake-check").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.wake-check.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".wake-check.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
