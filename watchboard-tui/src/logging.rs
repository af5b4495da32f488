//! File logging for the dashboard.
//!
//! The terminal belongs to the UI, so log records go to
//! `<cache dir>/watchboard/watchboard.log`. `RUST_LOG` overrides the level.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use env_logger::Target;

/// Default log file location.
pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("watchboard")
        .join("watchboard.log")
}

/// Install the global logger, appending to the file at `path`.
pub fn init(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("installing logger")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_log_directory_and_installs_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("watchboard.log");

        init(&path).unwrap();
        assert!(path.is_file());

        log::warn!("first line");
        assert!(init(&path).is_err(), "global logger is already installed");
    }
}
