//! CLI command definitions and handlers.

pub mod calibrate;
pub mod check;
pub mod models;
pub mod monitor;
pub mod status;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use wake_check_adapters::{detector_model_path, FsCalibrationStore, ScrfdDetector};
use wake_check_core::calibration::DEFAULT_TARGET_FRAMES;
use wake_check_core::RegionSize;

use crate::config::AppConfig;

/// Hardcoded default values.
mod defaults {
    /// Consecutive awake frames required for confirmation.
    pub const REQUIRED_FRAMES: u32 = 3;
}

/// wake-check - Webcam-style eye-openness alertness checking
#[derive(Parser)]
#[command(name = "wake-check")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Explicit config file (skips XDG/project layering)
    #[arg(long, global = true, value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Calibration store file (overrides config and default)
    #[arg(long, global = true, value_name = "FILE")]
    pub calibration_file: Option<PathBuf>,

    /// Custom models directory (overrides config and default)
    #[arg(long, global = true, value_name = "DIR")]
    pub models_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// One-shot awakeness check on a single image
    Check(check::CheckArgs),
    /// Process a frame sequence until awakeness is confirmed
    Monitor(monitor::MonitorArgs),
    /// Calibrate the brightness threshold from labeled frame sets
    Calibrate(calibrate::CalibrateArgs),
    /// Show stored calibration state and its health
    Status(status::StatusArgs),
    /// Manage the detector model
    Models(models::ModelsArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Verdict positive (or command succeeded).
    Success = 0,
    /// Verdict negative: not awake, or calibration missing/invalid.
    NotAwake = 1,
    /// Operational error.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}

/// Resolved CLI context: merged configuration plus global overrides.
pub struct AppContext {
    /// Layered configuration.
    pub config: AppConfig,
    /// `--calibration-file` override.
    pub calibration_file: Option<PathBuf>,
    /// `--models-dir` override.
    pub models_dir: Option<PathBuf>,
}

impl AppContext {
    /// The calibration store, honoring CLI and config overrides.
    #[must_use]
    pub fn store(&self) -> FsCalibrationStore {
        self.calibration_file
            .clone()
            .or_else(|| self.config.calibration.file.clone())
            .map_or_else(FsCalibrationStore::at_default, FsCalibrationStore::new)
    }

    /// The models directory override, CLI over config.
    #[must_use]
    pub fn models_dir(&self) -> Option<&Path> {
        self.models_dir
            .as_deref()
            .or(self.config.models.dir.as_deref())
    }

    /// Loads the detector backend, failing with a fetch hint when the model
    /// is absent.
    pub fn detector(&self) -> Result<ScrfdDetector> {
        let path = detector_model_path(self.models_dir());
        if !path.exists() {
            bail!(
                "detector model not found at {}. Run `wake-check models fetch`.",
                path.display()
            );
        }
        ScrfdDetector::from_file(&path).context("failed to initialize face detector")
    }

    /// Brightness threshold: CLI flag, then config, then the calibration
    /// store (which itself falls back to the default).
    #[must_use]
    pub fn resolve_threshold(&self, cli: Option<f64>) -> f64 {
        cli.or(self.config.analysis.threshold)
            .unwrap_or_else(|| self.store().load_threshold())
    }

    /// Eye region size from config, defaulting to 30x20.
    #[must_use]
    pub fn region_size(&self) -> RegionSize {
        let default = RegionSize::default();
        RegionSize::new(
            self.config.analysis.region_width.unwrap_or(default.width),
            self.config.analysis.region_height.unwrap_or(default.height),
        )
    }

    /// Consecutive-frame requirement: CLI, then config, then 3.
    #[must_use]
    pub fn required_frames(&self, cli: Option<u32>) -> u32 {
        cli.or(self.config.awakeness.required_frames)
            .unwrap_or(defaults::REQUIRED_FRAMES)
    }

    /// Calibration frame target: CLI, then config, then the core default.
    #[must_use]
    pub fn target_frames(&self, cli: Option<u32>) -> u32 {
        cli.or(self.config.calibration.target_frames)
            .unwrap_or(DEFAULT_TARGET_FRAMES)
    }
}
