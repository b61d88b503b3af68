//! Tracing setup: daily log file under the data directory plus stderr

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

const DEFAULT_FILTER: &str = "warn,civic_client=info,civic_cli=info";

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Install the global subscriber.
///
/// The file layer follows `RUST_LOG`. Stderr only shows warnings unless
/// `verbose` is set, so command output stays readable. Keep the returned
/// guard alive until exit or buffered file lines are lost.
pub fn init(log_dir: &Path, verbose: bool) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let (file_layer, guard) = match std::fs::create_dir_all(log_dir) {
        Ok(()) => {
            let file_appender = rolling::daily(log_dir, "civic.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer()
                .with_timer(LocalTimer)
                .with_ansi(false)
                .with_target(true)
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_writer(non_blocking_file)
                .with_filter(env_filter);
            (Some(layer), Some(guard))
        }
        Err(e) => {
            eprintln!("warning: cannot create log directory {}: {e}", log_dir.display());
            (None, None)
        }
    };

    let stderr_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let stderr_layer = fmt::layer()
        .with_timer(LocalTimer)
        .with_ansi(true)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_filter(stderr_level);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .init();

    tracing::debug!(path = %log_dir.display(), "Tracing initialized");
    guard
}
