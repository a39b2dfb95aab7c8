//! Monitor command - debounced awakeness over a frame sequence.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tracing::{info, warn};
use wake_check_adapters::FsFrameSource;
use wake_check_core::ports::FrameSource;
use wake_check_core::{AwakenessChecker, AwakenessState};

use super::{AppContext, ExitCode};

/// Arguments for the monitor command.
#[derive(Args, Clone)]
pub struct MonitorArgs {
    /// Frame files or directories, processed in sorted order
    #[arg(required = true)]
    pub frames: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Consecutive awake frames required for confirmation
    #[arg(long)]
    pub required: Option<u32>,

    /// Brightness threshold override (0-255)
    #[arg(long)]
    pub threshold: Option<f64>,
}

/// JSON summary written to stdout when monitoring ends.
#[derive(Serialize)]
struct MonitorReport {
    confirmed: bool,
    frames_processed: usize,
    consecutive: u32,
    required: u32,
    threshold: f64,
}

/// Run the monitor command.
///
/// Processes frames one at a time through the debounce session and stops at
/// the first confirmation — the Idle-to-Confirmed edge is the one-shot
/// "verified awake" signal.
pub fn run(args: &MonitorArgs, ctx: &AppContext) -> Result<ExitCode> {
    let threshold = ctx.resolve_threshold(args.threshold);
    let required = ctx.required_frames(args.required);

    let mut checker = AwakenessChecker::new(Box::new(ctx.detector()?), threshold, required)?;
    checker.set_region_size(ctx.region_size())?;

    let mut source = FsFrameSource::new(&args.frames, args.recursive);
    info!(
        "monitoring {} frames, requiring {required} consecutive awake frames",
        source.frame_hint().unwrap_or(0)
    );

    let mut frames_processed = 0usize;
    let mut confirmed = false;

    loop {
        let frame = match source.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => break,
            Err(e) => {
                // A frame that cannot be produced counts as a negative
                // verdict, same as any other per-frame fault.
                warn!("frame error treated as not-awake: {e}");
                frames_processed += 1;
                checker.observe_negative();
                continue;
            }
        };

        frames_processed += 1;
        let state = checker.observe(&frame.image);
        info!(
            "frame {}: {:?} ({}/{required})",
            frame.origin,
            state,
            checker.session().count()
        );

        if matches!(state, AwakenessState::Confirmed { .. }) {
            confirmed = true;
            break;
        }
    }

    let report = MonitorReport {
        confirmed,
        frames_processed,
        consecutive: checker.session().count(),
        required,
        threshold,
    };
    println!("{}", serde_json::to_string(&report)?);

    Ok(if confirmed {
        ExitCode::Success
    } else {
        ExitCode::NotAwake
    })
}
