//! Status command - report stored calibration health.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use wake_check_core::calibration::{SeparationQuality, DEFAULT_THRESHOLD};

use super::{AppContext, ExitCode};

/// Arguments for the status command.
#[derive(Args, Clone)]
pub struct StatusArgs {
    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,
}

/// JSON status report written to stdout.
#[derive(Serialize)]
struct StatusReport {
    store: String,
    calibrated: bool,
    valid: bool,
    threshold: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    open_avg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    closed_avg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    separation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    issue: Option<String>,
}

/// Run the status command.
///
/// Exit code 0 for a present and valid calibration, 1 for a missing or
/// invalid one.
pub fn run(args: &StatusArgs, ctx: &AppContext) -> Result<ExitCode> {
    let store = ctx.store();
    let store_path = store.path().to_string_lossy().into_owned();

    let report = match store.load() {
        Ok(Some(record)) => {
            let issue = record.validate().err().map(|e| e.to_string());
            StatusReport {
                store: store_path,
                calibrated: true,
                valid: issue.is_none(),
                threshold: record.threshold_or_default(),
                open_avg: record.open_avg,
                closed_avg: record.closed_avg,
                separation: record.separation,
                quality: record
                    .separation
                    .map(|s| SeparationQuality::from_separation(s).to_string()),
                issue,
            }
        }
        Ok(None) => StatusReport {
            store: store_path,
            calibrated: false,
            valid: false,
            threshold: DEFAULT_THRESHOLD,
            open_avg: None,
            closed_avg: None,
            separation: None,
            quality: None,
            issue: Some("no calibration stored".into()),
        },
        Err(e) => StatusReport {
            store: store_path,
            calibrated: false,
            valid: false,
            threshold: DEFAULT_THRESHOLD,
            open_avg: None,
            closed_avg: None,
            separation: None,
            quality: None,
            issue: Some(format!("{e:#}")),
        },
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");

    Ok(if report.valid {
        ExitCode::Success
    } else {
        ExitCode::NotAwake
    })
}
