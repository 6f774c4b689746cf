//! Tracing setup. Output goes to a log file because stdout belongs to the
//! alternate screen while the UI is running.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

pub const LOG_FILE_NAME: &str = "inline-edit.log";

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
///
/// Returns the log file path. Calling this twice is harmless; the second
/// subscriber is simply not installed.
pub fn init_logging(config: &LoggingConfig, log_dir: &Path) -> Result<PathBuf> {
    let path = log_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init();

    Ok(path)
}
