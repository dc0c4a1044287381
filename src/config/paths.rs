//! Path resolution for spotter configuration and data files.
//!
//! All spotter data is stored in `~/.spotter/` (or `$SPOTTER_HOME`):
//! - `config.yaml` - Main configuration file
//! - `spotter.db` - SQLite database of logged workouts
//! - `plans/` - Per-split routine overrides (YAML files)
//! - `cache/` - Active session and last fetched plan

use std::path::PathBuf;

use crate::error::SpotterError;

/// Environment variable that overrides the data root.
pub const HOME_ENV: &str = "SPOTTER_HOME";

/// Paths to spotter configuration and data directories.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.spotter/`
    pub root: PathBuf,
    /// Config file: `~/.spotter/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.spotter/spotter.db`
    pub database: PathBuf,
    /// Plans directory: `~/.spotter/plans/`
    pub plans: PathBuf,
    /// Cache directory: `~/.spotter/cache/`
    pub cache: PathBuf,
}

impl Paths {
    /// Resolve paths from `$SPOTTER_HOME`, falling back to `~/.spotter`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither `SPOTTER_HOME` nor `HOME` is set.
    pub fn new() -> Result<Self, SpotterError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            SpotterError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".spotter")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("spotter.db"),
            plans: root.join("plans"),
            cache: root.join("cache"),
            root,
        }
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), SpotterError> {
        for dir in [&self.root, &self.plans, &self.cache] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    SpotterError::Config(format!(
                        "Failed to create directory {}: {e}",
                        dir.display()
                    ))
                })?;
            }
        }

        Ok(())
    }
}
