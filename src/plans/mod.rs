//! Workout plan library.
//!
//! Plans come from `~/.spotter/plans/<split>.yaml` when such a file exists,
//! and from the built-in catalog otherwise. An override file looks like:
//!
//! ```yaml
//! ai_insight: Heavy week
//! routine:
//!   - id: bench
//!     name: Bench Press
//!     target_sets: 5
//!     target_reps: "5"
//!     rest_period_seconds: 180
//! ```

mod catalog;

use std::path::PathBuf;

use chrono::Local;
use serde::Deserialize;
use tracing::debug;

use crate::config::Paths;
use crate::core::PlanSource;
use crate::error::SpotterError;
use crate::session::{Exercise, WorkoutRoutine, WorkoutSplit};

pub use catalog::{builtin, BuiltinRoutine};

/// On-disk shape of a plan override.
#[derive(Debug, Deserialize)]
struct PlanFile {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    ai_insight: Option<String>,
    routine: Vec<Exercise>,
}

/// Local [`PlanSource`] backed by override files and built-in routines.
pub struct PlanLibrary {
    plans_dir: PathBuf,
}

impl PlanLibrary {
    /// Open the library at the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the plans directory cannot be created.
    pub fn new() -> Result<Self, SpotterError> {
        let paths = Paths::new()?;
        paths.ensure_dirs()?;
        Ok(Self {
            plans_dir: paths.plans,
        })
    }

    /// Create a library over a custom directory (for testing).
    #[must_use]
    pub const fn with_dir(dir: PathBuf) -> Self {
        Self { plans_dir: dir }
    }

    /// Path of the override file for a split.
    #[must_use]
    pub fn override_path(&self, split: WorkoutSplit) -> PathBuf {
        self.plans_dir.join(format!("{}.yaml", split.slug()))
    }

    fn load_override(
        &self,
        split: WorkoutSplit,
        date: &str,
    ) -> Result<Option<WorkoutRoutine>, SpotterError> {
        let path = self.override_path(split);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            SpotterError::PlanFetch(format!("Failed to read {}: {e}", path.display()))
        })?;
        let file: PlanFile = serde_yaml::from_str(&content).map_err(|e| {
            SpotterError::PlanFetch(format!("Failed to parse {}: {e}", path.display()))
        })?;

        debug!(path = %path.display(), "Loaded plan override");
        Ok(Some(WorkoutRoutine {
            id: file
                .id
                .unwrap_or_else(|| format!("{}-custom-{date}", split.slug())),
            date: date.to_string(),
            ai_insight: file.ai_insight,
            routine: file.routine,
        }))
    }
}

impl PlanSource for PlanLibrary {
    fn fetch_plan(&self, split: WorkoutSplit) -> Result<WorkoutRoutine, SpotterError> {
        let date = Local::now().format("%Y-%m-%d").to_string();

        let routine = match self.load_override(split, &date)? {
            Some(routine) => routine,
            None => {
                let builtin = builtin(split);
                WorkoutRoutine {
                    id: format!("{}-{date}", split.slug()),
                    date,
                    ai_insight: Some(builtin.insight.to_string()),
                    routine: builtin.exercises,
                }
            }
        };

        routine
            .validate()
            .map_err(|e| SpotterError::PlanFetch(e.to_string()))?;
        Ok(routine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_plan() {
        let temp_dir = TempDir::new().unwrap();
        let library = PlanLibrary::with_dir(temp_dir.path().to_path_buf());

        let routine = library.fetch_plan(WorkoutSplit::Legs).unwrap();
        assert!(routine.id.starts_with("legs-"));
        assert!(routine.ai_insight.is_some());
        assert_eq!(routine.routine.len(), builtin(WorkoutSplit::Legs).exercises.len());
    }

    #[test]
    fn test_override_file() {
        let temp_dir = TempDir::new().unwrap();
        let library = PlanLibrary::with_dir(temp_dir.path().to_path_buf());
        std::fs::write(
            library.override_path(WorkoutSplit::Push),
            concat!(
                "routine:\n",
                "  - id: bench\n",
                "    name: Bench Press\n",
                "    target_sets: 5\n",
                "    target_reps: \"5\"\n",
            ),
        )
        .unwrap();

        let routine = library.fetch_plan(WorkoutSplit::Push).unwrap();
        assert!(routine.id.starts_with("push-custom-"));
        assert_eq!(routine.routine.len(), 1);
        assert_eq!(routine.routine[0].target_sets, 5);

        // Other splits are unaffected
        let pull = library.fetch_plan(WorkoutSplit::Pull).unwrap();
        assert!(pull.routine.len() > 1);
    }

    #[test]
    fn test_malformed_override_is_fetch_error() {
        let temp_dir = TempDir::new().unwrap();
        let library = PlanLibrary::with_dir(temp_dir.path().to_path_buf());
        std::fs::write(library.override_path(WorkoutSplit::Abs), "routine: [[[").unwrap();

        let err = library.fetch_plan(WorkoutSplit::Abs).unwrap_err();
        assert!(matches!(err, SpotterError::PlanFetch(_)));
    }

    #[test]
    fn test_empty_override_is_fetch_error() {
        let temp_dir = TempDir::new().unwrap();
        let library = PlanLibrary::with_dir(temp_dir.path().to_path_buf());
        std::fs::write(library.override_path(WorkoutSplit::Abs), "routine: []\n").unwrap();

        let err = library.fetch_plan(WorkoutSplit::Abs).unwrap_err();
        assert!(matches!(err, SpotterError::PlanFetch(_)));
    }
}
