//! The linear analysis pipeline shared by the CLI front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! config merge -> feed fetch -> statistic -> plot -> notify
//!
//! Every stage takes its inputs explicitly and returns a typed result, so a
//! fetch failure aborts the run instead of leaving later stages to operate
//! on data that was never loaded.

use std::path::PathBuf;

use crate::config::Config;
use crate::data::{Dataset, NeowsClient};
use crate::error::AppError;
use crate::plot::PlotStyle;

/// Caller-side knobs for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub job_config: PathBuf,
    pub save_path: Option<PathBuf>,
    pub plot: bool,
    pub notify_message: Option<String>,
}

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub config: Config,
    pub dataset: Dataset,
    pub mean_magnitude: f64,
    pub figure_path: Option<PathBuf>,
}

/// Execute the full pipeline and return the computed outputs.
pub fn run_analysis(options: &RunOptions) -> Result<RunOutput, AppError> {
    // 1) Merge the config layers.
    let config = Config::load(&options.job_config)?;

    // 2) One blocking feed fetch.
    let client = NeowsClient::new()?;
    let dataset = client.fetch_feed(&config)?;

    run_with_dataset(config, dataset, options)
}

/// Execute the post-fetch stages against an already-loaded dataset.
///
/// This is what the tests exercise: everything after the network call is a
/// pure function of config + dataset (plus the figure written to disk).
pub fn run_with_dataset(
    config: Config,
    dataset: Dataset,
    options: &RunOptions,
) -> Result<RunOutput, AppError> {
    // 3) The summary statistic.
    let mean_magnitude = crate::stats::mean_magnitude(&dataset)?;

    // 4) Scatter plot, unless the caller opted out.
    let figure_path = if options.plot {
        let style = PlotStyle::from_config(&config)?;
        Some(crate::plot::render_scatter(
            &dataset,
            &style,
            options.save_path.as_deref(),
        )?)
    } else {
        None
    };

    // 5) Optional completion notification.
    if let Some(message) = &options.notify_message {
        crate::notify::notify_done(&config, message)?;
    }

    Ok(RunOutput {
        config,
        dataset,
        mean_magnitude,
        figure_path,
    })
}
