//! Tracing subscriber setup for both binaries.
//!
//! The TUI owns the terminal, so it logs to a file through a non-blocking
//! appender. The CLI logs to stderr so stdout stays clean for table output.

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

pub const LOG_FILE_NAME: &str = "adlens.log";

/// Default log location: `<data_dir>/adlens/adlens.log`, or the working
/// directory when no data directory is known.
pub fn default_log_path() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join("adlens").join(LOG_FILE_NAME),
        None => PathBuf::from(LOG_FILE_NAME),
    }
}

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install a file subscriber. Keep the guard alive until exit so buffered
/// lines are flushed.
pub fn init_file(config: &LoggingConfig) -> io::Result<(WorkerGuard, PathBuf)> {
    let path = config.file.clone().unwrap_or_else(default_log_path);
    let file = open_append(&path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(filter(&config.level))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))?;

    Ok((guard, path))
}

/// Install a stderr subscriber.
pub fn init_stderr(level: &str) -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter(level))
        .with_target(false)
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))
}

fn open_append(path: &Path) -> io::Result<std::fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_append_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("adlens.log");
        open_append(&path).unwrap();
        assert!(path.is_file());
    }
}
