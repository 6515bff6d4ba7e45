//! Tracing setup
//!
//! CLI mode logs to stderr. The TUI owns the terminal, so it logs to a file
//! under the user cache directory instead.

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `digitalflix=debug`)
pub const LOG_ENV: &str = "DIGITALFLIX_LOG";

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Log file used in TUI mode (~/.cache/digitalflix/digitalflix.log)
pub fn log_file_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join("digitalflix").join("digitalflix.log"))
}

/// Initialize logging for CLI mode
pub fn init_cli(quiet: bool) {
    let default = if quiet { "error" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Initialize logging for TUI mode
pub fn init_tui() -> Result<PathBuf> {
    let path = log_file_path().context("Could not determine cache directory")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter("info"))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))?;

    Ok(path)
}
