//! Error types for spotter.

use thiserror::Error;

use crate::session::{SetAction, TimerStatus};

/// Rejection reasons produced by the workout session engine.
///
/// Every rejection leaves the session exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The addressed exercise or set does not exist.
    #[error("No set {} in exercise {}", .set + 1, .exercise + 1)]
    OutOfRange { exercise: usize, set: usize },

    /// Another set is already running.
    #[error(
        "Set {} of exercise {} is already active. Pause or finish it first.",
        .set + 1,
        .exercise + 1
    )]
    SetAlreadyActive { exercise: usize, set: usize },

    /// The set's current status does not admit the action.
    #[error("Cannot {action} a set that is {status}")]
    InvalidTransition { action: SetAction, status: TimerStatus },

    /// Sets cannot be started while the whole workout is paused.
    #[error("The workout is paused. Resume it before starting a set.")]
    WorkoutPaused,

    /// The workout is already paused.
    #[error("The workout is not running")]
    WorkoutNotRunning,

    /// The workout is not paused.
    #[error("The workout is not paused")]
    WorkoutNotPaused,

    /// The routine cannot be turned into a session.
    #[error("Invalid routine: {0}")]
    InvalidRoutine(String),

    /// A restored session breaks a structural invariant.
    #[error("Corrupted session: {0}")]
    Corrupted(String),
}

/// Main error type for spotter.
#[derive(Debug, Error)]
pub enum SpotterError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Item not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The plan source could not produce a routine.
    #[error("Failed to fetch workout plan: {0}")]
    PlanFetch(String),

    /// The log sink rejected a finished workout.
    #[error("Failed to save workout: {0}")]
    Submission(String),

    /// A command needs a live workout and there is none.
    #[error("No active workout. Start one with 'spotter start'.")]
    NoActiveWorkout,

    /// A workout is already running.
    #[error("A workout is already in progress. Finish or cancel it first.")]
    WorkoutInProgress,

    /// The engine rejected an action.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse error.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SpotterError {
    /// Whether this is a transient notice rather than a failure.
    ///
    /// Engine rejections are shown to the user and otherwise ignored.
    #[must_use]
    pub const fn is_notice(&self) -> bool {
        matches!(self, Self::Session(_))
    }
}
