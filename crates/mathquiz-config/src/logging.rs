//! Logging bootstrap.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Crates whose events the default filter lets through.
const CRATE_TARGETS: [&str; 3] = ["mathquiz", "mathquiz_core", "mathquiz_config"];

fn default_directives(level: &str) -> String {
    CRATE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Open the log file, truncating it when `clear_on_start` is set.
pub fn open_log_file(path: &Path, clear_on_start: bool) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory: {}", parent.display()))?;
    }

    let mut options = OpenOptions::new();
    options.create(true);
    if clear_on_start {
        options.write(true).truncate(true);
    } else {
        options.append(true);
    }
    options
        .open(path)
        .with_context(|| format!("failed to open log file: {}", path.display()))
}

/// Install the global `tracing` subscriber described by `config`.
///
/// Returns `false` without installing anything when logging is disabled.
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &LogConfig) -> Result<bool> {
    if !config.enabled {
        return Ok(false);
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(&config.level)))
        .with_context(|| format!("invalid log level: {}", config.level))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match &config.file {
        Some(path) => {
            let file = open_log_file(path, config.clear_on_start)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))?;

    tracing::info!(
        level = %config.level,
        file = ?config.file,
        clear_on_start = config.clear_on_start,
        "logging initialized"
    );
    Ok(true)
}
