use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::utils::{self, Profile};

pub const LOG_FILE_NAME: &str = "weekplan.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to determine data directory")]
    DataDirError,
    #[error("Failed to create log directory {0}: {1}")]
    CreateDirError(PathBuf, std::io::Error),
    #[error("Invalid log filter: {0}")]
    FilterError(String),
}

/// Level used when `RUST_LOG` is unset. Each `-v` raises the configured level
/// one step, up to `trace`.
pub fn effective_level(configured: &str, verbose: u8) -> String {
    let order = ["error", "warn", "info", "debug", "trace"];
    let base = order
        .iter()
        .position(|l| l.eq_ignore_ascii_case(configured.trim()))
        .unwrap_or(2);
    let idx = (base + verbose as usize).min(order.len() - 1);
    order[idx].to_string()
}

/// Route tracing output to `<data_dir>/weekplan.log`.
///
/// The terminal belongs to the TUI, so nothing is written to stdout or stderr.
/// Keep the returned guard alive until exit so buffered lines get flushed.
pub fn init_logging(
    profile: Profile,
    level: &str,
    verbose: u8,
) -> Result<WorkerGuard, LoggingError> {
    let dir = utils::get_data_dir(profile).ok_or(LoggingError::DataDirError)?;
    init_logging_in(&dir, level, verbose)
}

pub fn init_logging_in(dir: &Path, level: &str, verbose: u8) -> Result<WorkerGuard, LoggingError> {
    fs::create_dir_all(dir).map_err(|e| LoggingError::CreateDirError(dir.to_path_buf(), e))?;

    let default_level = effective_level(level, verbose);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&default_level))
        .map_err(|e| LoggingError::FilterError(e.to_string()))?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let init_result = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .try_init();

    if let Err(err) = init_result {
        tracing::debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(guard)
}
