//! wake-check CLI - webcam-style eye-openness alertness checking.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;

use commands::{AppContext, Cli, Commands, ExitCode};
use config::AppConfig;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = cli
        .config_file
        .as_deref()
        .map_or_else(AppConfig::load, AppConfig::load_from);

    let ctx = AppContext {
        config,
        calibration_file: cli.calibration_file,
        models_dir: cli.models_dir,
    };

    let exit_code = match cli.command {
        Commands::Check(ref args) => run_verdict(commands::check::run(args, &ctx)),
        Commands::Monitor(ref args) => run_verdict(commands::monitor::run(args, &ctx)),
        Commands::Calibrate(ref args) => run_verdict(commands::calibrate::run(args, &ctx)),
        Commands::Status(ref args) => run_verdict(commands::status::run(args, &ctx)),
        Commands::Models(ref args) => match commands::models::run(args, &ctx) {
            Ok(()) => ExitCode::Success,
            Err(e) => {
                eprintln!("error: {e:#}");
                ExitCode::Error
            }
        },
    };

    exit_code.into()
}

fn run_verdict(result: anyhow::Result<ExitCode>) -> ExitCode {
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::Error
        }
    }
}
