//! JSON output formatting for spotter.

use serde::Serialize;
use serde_json::json;

use crate::error::SpotterError;
use crate::session::{
    LogWorkoutRequest, SetTransition, WorkoutRoutine, WorkoutSplit, WorkoutView,
};
use crate::storage::LogSummary;

/// Format a routine as JSON
///
/// # Errors
///
/// Returns `SpotterError::Parse` if JSON serialization fails.
pub fn format_plan_json(
    routine: &WorkoutRoutine,
    split: WorkoutSplit,
) -> Result<String, SpotterError> {
    let output = json!({
        "split": split,
        "routine": routine,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a set transition with the resulting view as JSON
///
/// # Errors
///
/// Returns `SpotterError::Parse` if JSON serialization fails.
pub fn format_transition_json(
    transition: &SetTransition,
    view: Option<&WorkoutView>,
) -> Result<String, SpotterError> {
    let output = json!({
        "transition": transition,
        "workout": view,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format workout history as JSON
///
/// # Errors
///
/// Returns `SpotterError::Parse` if JSON serialization fails.
pub fn format_history_json(logs: &[LogSummary]) -> Result<String, SpotterError> {
    let output = json!({
        "count": logs.len(),
        "items": logs,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format one logged workout as JSON
///
/// # Errors
///
/// Returns `SpotterError::Parse` if JSON serialization fails.
pub fn format_log_json(id: i64, log: &LogWorkoutRequest) -> Result<String, SpotterError> {
    let output = json!({
        "id": id,
        "setCount": log.set_count(),
        "totalVolume": log.total_volume(),
        "log": log,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `SpotterError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, SpotterError> {
    Ok(serde_json::to_string_pretty(value)?)
}
