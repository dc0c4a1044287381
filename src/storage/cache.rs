//! Key-value cache for the live session and the last fetched plan.
//!
//! Each key is one JSON file in `~/.spotter/cache/`. Writes go to a
//! temporary file that is then renamed over the entry. An entry that cannot
//! be read back is removed and reported as missing.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Paths;
use crate::error::SpotterError;
use crate::session::{ActiveWorkoutState, WorkoutRoutine, WorkoutSplit};

/// Key of the serialized live session.
pub const ACTIVE_SESSION_KEY: &str = "active_workout_state";

/// Key of the most recently fetched plan.
pub const LAST_PLAN_KEY: &str = "last_plan";

/// A fetched routine together with the split it was fetched for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedPlan {
    pub split: WorkoutSplit,
    pub routine: WorkoutRoutine,
}

/// File-backed session cache.
#[derive(Debug, Clone)]
pub struct SessionCache {
    dir: PathBuf,
}

impl SessionCache {
    /// Open the cache at the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache directory cannot be created.
    pub fn new() -> Result<Self, SpotterError> {
        let paths = Paths::new()?;
        paths.ensure_dirs()?;
        Ok(Self { dir: paths.cache })
    }

    /// Create a cache in a custom directory (for testing).
    #[must_use]
    pub const fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Read an entry.
    ///
    /// An unreadable or malformed entry is removed and `None` is returned.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.entry_path(key);
        if !path.exists() {
            return None;
        }

        let parsed = std::fs::read_to_string(&path)
            .map_err(SpotterError::from)
            .and_then(|content| serde_json::from_str(&content).map_err(SpotterError::from));

        match parsed {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Discarding unreadable cache entry");
                self.discard(key);
                None
            }
        }
    }

    /// Write an entry, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized or written.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), SpotterError> {
        std::fs::create_dir_all(&self.dir)?;

        let content = serde_json::to_string(value)?;
        let path = self.entry_path(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));

        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &path)?;
        debug!(key, "Cache entry written");
        Ok(())
    }

    /// Remove an entry. Removing a missing entry is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be deleted.
    pub fn remove(&self, key: &str) -> Result<(), SpotterError> {
        let path = self.entry_path(key);
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }

    fn discard(&self, key: &str) {
        if let Err(e) = self.remove(key) {
            warn!(key, error = %e, "Failed to remove cache entry");
        }
    }

    /// Persist the live session.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be written.
    pub fn save_active_session(&self, state: &ActiveWorkoutState) -> Result<(), SpotterError> {
        self.set(ACTIVE_SESSION_KEY, state)
    }

    /// Restore the live session, if one was cached.
    ///
    /// A session that fails validation is treated as corrupted.
    #[must_use]
    pub fn load_active_session(&self) -> Option<ActiveWorkoutState> {
        let state: ActiveWorkoutState = self.get(ACTIVE_SESSION_KEY)?;

        match state.validate() {
            Ok(()) => Some(state),
            Err(e) => {
                warn!(error = %e, "Discarding corrupted workout session");
                self.discard(ACTIVE_SESSION_KEY);
                None
            }
        }
    }

    /// Forget the live session.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be deleted.
    pub fn clear_active_session(&self) -> Result<(), SpotterError> {
        self.remove(ACTIVE_SESSION_KEY)
    }

    /// Remember the most recently fetched plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be written.
    pub fn save_last_plan(
        &self,
        split: WorkoutSplit,
        routine: &WorkoutRoutine,
    ) -> Result<(), SpotterError> {
        self.set(
            LAST_PLAN_KEY,
            &CachedPlan {
                split,
                routine: routine.clone(),
            },
        )
    }

    /// The most recently fetched plan, if any.
    ///
    /// A routine that cannot be run is treated as corrupted.
    #[must_use]
    pub fn load_last_plan(&self) -> Option<CachedPlan> {
        let cached: CachedPlan = self.get(LAST_PLAN_KEY)?;

        match cached.routine.validate() {
            Ok(()) => Some(cached),
            Err(e) => {
                warn!(error = %e, "Discarding unusable cached plan");
                self.discard(LAST_PLAN_KEY);
                None
            }
        }
    }
}
