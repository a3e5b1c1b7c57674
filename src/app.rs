//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - installs logging
//! - parses CLI arguments
//! - runs the analysis pipeline
//! - prints the run summary

use clap::Parser;
use tracing::error;

use crate::cli::{Cli, Command, NotifyArgs, RunArgs};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `neows` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    // Keep the file-writer guard alive for the whole run.
    let _log_guard = crate::logging::init();

    let result = match cli.command {
        Command::Run(args) => handle_run(args),
        Command::Notify(args) => handle_notify(args),
    };
    if let Err(err) = &result {
        error!(kind = ?err.kind(), "{err}");
    }
    result
}

fn handle_run(args: RunArgs) -> Result<(), AppError> {
    let options = pipeline::RunOptions {
        job_config: args.job_config,
        save_path: args.save_path,
        plot: !args.no_plot,
        notify_message: args.notify,
    };
    let run = pipeline::run_analysis(&options)?;

    println!(
        "Mean absolute magnitude over {} objects: {:.4}",
        run.dataset.len(),
        run.mean_magnitude
    );
    if let Some(path) = &run.figure_path {
        println!("Figure saved to {}", path.display());
    }

    Ok(())
}

fn handle_notify(args: NotifyArgs) -> Result<(), AppError> {
    let config = crate::config::Config::load(&args.job_config)?;
    crate::notify::notify_done(&config, &args.message)
}
