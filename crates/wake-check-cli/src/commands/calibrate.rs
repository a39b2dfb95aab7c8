//! Calibrate command - fit a personalized brightness threshold.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;
use tracing::info;
use wake_check_adapters::FsFrameSource;
use wake_check_core::calibration::{CalibrationRecord, CalibrationResult, ThresholdCalibrator};

use super::{AppContext, ExitCode};

/// Arguments for the calibrate command.
#[derive(Args, Clone)]
pub struct CalibrateArgs {
    /// Frames captured with eyes wide open
    #[arg(long, value_name = "PATH", required = true, num_args = 1..)]
    pub open: Vec<PathBuf>,

    /// Frames captured with eyes fully closed
    #[arg(long, value_name = "PATH", required = true, num_args = 1..)]
    pub closed: Vec<PathBuf>,

    /// Successful frames to collect per phase
    #[arg(long)]
    pub target_frames: Option<u32>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Recalibrate even when a valid calibration already exists
    #[arg(long)]
    pub force: bool,
}

/// JSON calibration report written to stdout.
#[derive(Serialize)]
struct CalibrationReport {
    #[serde(flatten)]
    result: CalibrationResult,
    quality: String,
    store: String,
}

/// Run the calibrate command.
///
/// Runs the open-eye phase, then the closed-eye phase, fits the threshold,
/// and persists only after a successful fit — an aborted or failed run
/// leaves any previous calibration untouched.
pub fn run(args: &CalibrateArgs, ctx: &AppContext) -> Result<ExitCode> {
    let store = ctx.store();

    if !args.force {
        if let Ok(Some(existing)) = store.load() {
            if existing.is_valid() {
                bail!(
                    "a valid calibration already exists at {} (threshold {}). \
                     Pass --force to recalibrate.",
                    store.path().display(),
                    existing.threshold_or_default()
                );
            }
        }
    }

    let detector = ctx.detector()?;
    let calibrator = ThresholdCalibrator::new(ctx.target_frames(args.target_frames))?
        .with_region_size(ctx.region_size())?;

    let mut open_source = FsFrameSource::new(&args.open, args.recursive);
    let mut closed_source = FsFrameSource::new(&args.closed, args.recursive);

    let result = calibrator.run(&detector, &mut open_source, &mut closed_source)?;

    store.save(&CalibrationRecord::from_result(&result))?;
    info!("calibration complete, threshold {}", result.threshold);

    let report = CalibrationReport {
        quality: result.quality().to_string(),
        store: store.path().to_string_lossy().into_owned(),
        result,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(ExitCode::Success)
}
