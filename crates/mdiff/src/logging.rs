//! File-backed tracing setup

use crate::config::LogConfig;
use anyhow::{anyhow, Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::Level;

/// Install a fmt subscriber writing to the configured log file.
///
/// Nothing is installed without a file: stderr belongs to the alternate
/// screen while the UI runs. Returns whether a subscriber was installed.
pub fn init(config: &LogConfig) -> Result<bool> {
    let Some(path) = &config.file else {
        return Ok(false);
    };

    let level = parse_level(&config.level);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_max_level(level)
        .try_init()
        .map_err(|e| anyhow!("Failed to install logger: {}", e))?;

    tracing::info!(path = %path.display(), %level, "logging started");
    Ok(true)
}

/// Unknown levels fall back to `info`
fn parse_level(level: &str) -> Level {
    level.trim().parse().unwrap_or(Level::INFO)
}
