// src/logging.rs

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::DashboardError;

const LOG_FILE: &str = "sample-dashboard.log";
const DEFAULT_FILTER: &str = "info,sample_dashboard=debug";

/// File logging only; the terminal belongs to the UI. Hold the returned guard
/// until exit so buffered lines are flushed.
pub fn init(log_dir: &Path) -> Result<WorkerGuard, DashboardError> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init();

    Ok(guard)
}
