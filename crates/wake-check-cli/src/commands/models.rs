//! Models command - fetch and locate the detector model.

use anyhow::Result;
use clap::{Args, Subcommand};
use wake_check_adapters::{detector_model_path, ensure_detector_model, DETECTOR_MODEL};

use super::AppContext;

/// Arguments for the models command.
#[derive(Args, Clone)]
pub struct ModelsArgs {
    #[command(subcommand)]
    pub action: ModelsAction,
}

/// Model management actions.
#[derive(Subcommand, Clone)]
pub enum ModelsAction {
    /// Download and verify the detector model
    Fetch,
    /// Print the resolved model path and whether it is present
    Path,
}

/// Run the models command.
pub fn run(args: &ModelsArgs, ctx: &AppContext) -> Result<()> {
    match args.action {
        ModelsAction::Fetch => {
            let path = ensure_detector_model(ctx.models_dir())?;
            println!("{} ready at {}", DETECTOR_MODEL.name, path.display());
        }
        ModelsAction::Path => {
            let path = detector_model_path(ctx.models_dir());
            let state = if path.exists() { "present" } else { "missing" };
            println!("{} ({state})", path.display());
        }
    }
    Ok(())
}
