//! Tracing setup for the two binary surfaces.
//!
//! Plain CLI commands log to stderr. The TUI owns the terminal's
//! alternate screen, so its logs go to a daily-rotated file under
//! `$WREN_HOME/logs` instead.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::paths;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initializes stderr logging for one-shot CLI commands.
pub fn init_cli() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Initializes file logging for the TUI.
///
/// Returns the worker guard (must be kept alive for the program's
/// duration or buffered log lines are dropped) and the log directory.
pub fn init_tui() -> Result<(WorkerGuard, PathBuf)> {
    let logs_dir = paths::logs_dir();
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Failed to create log directory {}", logs_dir.display()))?;

    let appender = tracing_appender::rolling::daily(&logs_dir, "wren.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init();

    Ok((guard, logs_dir))
}
