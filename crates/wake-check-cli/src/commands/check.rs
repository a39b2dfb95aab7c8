//! Check command - one-shot awakeness verdict on a single image.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tracing::info;
use wake_check_core::{AwakenessChecker, DualEyeResult};

use super::{AppContext, ExitCode};

/// Arguments for the check command.
#[derive(Args, Clone)]
pub struct CheckArgs {
    /// Image file to check
    pub image: PathBuf,

    /// Brightness threshold override (0-255)
    #[arg(long, value_parser = parse_threshold)]
    pub threshold: Option<f64>,

    /// Pretty-print the JSON verdict
    #[arg(long)]
    pub pretty: bool,
}

/// Parse and validate a threshold value (0-255).
fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=255.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0..=255"))
    }
}

/// JSON verdict written to stdout.
#[derive(Serialize)]
struct CheckReport {
    frame: String,
    threshold: f64,
    awake: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    analysis: Option<DualEyeResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run the check command.
pub fn run(args: &CheckArgs, ctx: &AppContext) -> Result<ExitCode> {
    let threshold = ctx.resolve_threshold(args.threshold);
    info!(
        "checking {} at threshold {threshold}",
        args.image.display()
    );

    let image = image::open(&args.image)
        .with_context(|| format!("failed to open image {}", args.image.display()))?;

    let mut checker = AwakenessChecker::new(Box::new(ctx.detector()?), threshold, 1)?;
    checker.set_region_size(ctx.region_size())?;

    // Per-frame faults become a negative verdict with the reason attached;
    // only operational errors above abort the command.
    let report = match checker.analyze_frame(&image) {
        Ok(analysis) => CheckReport {
            frame: args.image.to_string_lossy().into_owned(),
            threshold,
            awake: analysis.both_open,
            analysis: Some(analysis),
            error: None,
        },
        Err(e) => CheckReport {
            frame: args.image.to_string_lossy().into_owned(),
            threshold,
            awake: false,
            analysis: None,
            error: Some(e.to_string()),
        },
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");

    Ok(if report.awake {
        ExitCode::Success
    } else {
        ExitCode::NotAwake
    })
}
