//! Boundaries between the session engine and the outside world.
//!
//! The tracker only talks to plans and persistence through these traits.
//! The crate ships local implementations: [`PlanLibrary`] and [`LogStore`].
//!
//! [`PlanLibrary`]: crate::plans::PlanLibrary
//! [`LogStore`]: crate::storage::LogStore

use crate::error::SpotterError;
use crate::session::{LogAck, LogWorkoutRequest, WorkoutRoutine, WorkoutSplit};

/// Produces a routine for a split.
#[cfg_attr(test, mockall::automock)]
pub trait PlanSource {
    /// Fetch a routine for `split`.
    ///
    /// # Errors
    ///
    /// Returns `SpotterError::PlanFetch` with a human-readable message.
    fn fetch_plan(&self, split: WorkoutSplit) -> Result<WorkoutRoutine, SpotterError>;
}

/// Accepts finished workouts.
#[cfg_attr(test, mockall::automock)]
pub trait LogSink {
    /// Persist a finished workout and return its log id.
    ///
    /// # Errors
    ///
    /// Returns `SpotterError::Submission` with a human-readable message.
    fn submit_log(&self, payload: &LogWorkoutRequest) -> Result<LogAck, SpotterError>;
}
