//! Command-line parsing for the NeoWs analysis pipeline.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the fetch/statistics/plotting code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "neows", version, about = "NASA NeoWs feed analysis pipeline")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full pipeline: merge configs, fetch the feed, compute the
    /// mean absolute magnitude, render the scatter plot, optionally notify.
    Run(RunArgs),
    /// Send a standalone notification to the configured ntfy topic.
    Notify(NotifyArgs),
}

/// Options for a full pipeline run.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Path to the job-specific configuration file (merged after the
    /// system and user layers).
    #[arg(value_name = "JOB_CONFIG")]
    pub job_config: PathBuf,

    /// Save the figure here instead of the configured default path.
    #[arg(short, long, value_name = "PATH")]
    pub save_path: Option<PathBuf>,

    /// Skip the plotting stage.
    #[arg(long, default_value_t = false)]
    pub no_plot: bool,

    /// Send this message to the configured ntfy topic once the run finishes.
    #[arg(short = 'm', long = "notify", value_name = "MESSAGE")]
    pub notify: Option<String>,
}

/// Options for a standalone notification.
#[derive(Debug, Parser, Clone)]
pub struct NotifyArgs {
    /// Path to the job-specific configuration file (for the topic).
    #[arg(value_name = "JOB_CONFIG")]
    pub job_config: PathBuf,

    /// Text of the notification to send.
    #[arg(value_name = "MESSAGE")]
    pub message: String,
}
