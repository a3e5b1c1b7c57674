//! Logging setup: colored stderr output plus an append-mode log file.
//!
//! Every pipeline stage reports its outcome through `tracing`, so one run
//! leaves a timestamped trail in both places. The file path can be moved
//! with `NEOWS_LOG_PATH`; the stderr verbosity with `RUST_LOG`.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub const DEFAULT_LOG_PATH: &str = "neows_analysis.log";

/// Install the global subscriber.
///
/// Returns the file writer's guard; it must stay alive for the duration of
/// the run or buffered log lines are lost. A log file location that cannot
/// be prepared (e.g. a bad `NEOWS_LOG_PATH` override) falls back to the
/// default path, then to stderr-only logging; it never aborts the run.
/// Safe to call more than once (later calls keep the existing subscriber),
/// which keeps tests simple.
pub fn init() -> Option<WorkerGuard> {
    let log_path =
        std::env::var("NEOWS_LOG_PATH").unwrap_or_else(|_| DEFAULT_LOG_PATH.to_string());

    let appender = file_appender(Path::new(&log_path)).or_else(|| {
        if log_path == DEFAULT_LOG_PATH {
            None
        } else {
            eprintln!("cannot open log file '{log_path}', falling back to '{DEFAULT_LOG_PATH}'");
            file_appender(Path::new(DEFAULT_LOG_PATH))
        }
    });

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let (file_layer, guard) = match appender {
        Some(appender) => {
            let (non_blocking_file, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking_file)
                .with_filter(EnvFilter::new("info"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let _ = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    guard
}

/// Build an appender for the given log file path.
///
/// `Rotation::NEVER` appends to one file across runs. Returns `None` when
/// the file location cannot be prepared, so the caller can fall back
/// instead of panicking.
fn file_appender(path: &Path) -> Option<RollingFileAppender> {
    let log_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let log_file_name = path.file_name()?.to_str()?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(log_file_name)
        .build(log_dir)
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appender_builds_for_a_writable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");
        assert!(file_appender(&path).is_some());
    }

    #[test]
    fn unpreparable_log_directory_is_not_fatal() {
        // A regular file where the directory component should be makes the
        // location impossible to prepare.
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let path = blocker.join("sub").join("run.log");
        assert!(file_appender(&path).is_none());
    }
}
