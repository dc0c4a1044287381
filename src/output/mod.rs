//! Output formatting for spotter.
//!
//! Every command renders through here as either colored text or JSON.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::config::WeightUnit;
use crate::error::SpotterError;
use crate::session::{
    ActiveWorkoutState, LogAck, LogWorkoutRequest, SetTransition, WorkoutRoutine, WorkoutSplit,
    WorkoutView,
};
use crate::storage::LogSummary;

pub use json::*;
pub use pretty::*;

/// Format a routine based on output format
///
/// # Errors
///
/// Returns `SpotterError::Parse` if JSON serialization fails.
pub fn format_plan(
    routine: &WorkoutRoutine,
    split: WorkoutSplit,
    unit: WeightUnit,
    format: OutputFormat,
) -> Result<String, SpotterError> {
    match format {
        OutputFormat::Pretty => Ok(format_plan_pretty(routine, split, unit)),
        OutputFormat::Json => format_plan_json(routine, split),
    }
}

/// Format the live workout view based on output format
///
/// # Errors
///
/// Returns `SpotterError::Parse` if JSON serialization fails.
pub fn format_view(
    view: &WorkoutView,
    unit: WeightUnit,
    format: OutputFormat,
) -> Result<String, SpotterError> {
    match format {
        OutputFormat::Pretty => Ok(format_view_pretty(view, unit)),
        OutputFormat::Json => to_json(view),
    }
}

/// Format a set action's outcome based on output format
///
/// # Errors
///
/// Returns `SpotterError::Parse` if JSON serialization fails.
pub fn format_transition(
    transition: &SetTransition,
    exercise: &str,
    set_number: u32,
    view: Option<&WorkoutView>,
    format: OutputFormat,
) -> Result<String, SpotterError> {
    match format {
        OutputFormat::Pretty => Ok(format_transition_pretty(transition, exercise, set_number)),
        OutputFormat::Json => format_transition_json(transition, view),
    }
}

/// Format a freshly started workout based on output format
///
/// # Errors
///
/// Returns `SpotterError::Parse` if JSON serialization fails.
pub fn format_started(
    state: &ActiveWorkoutState,
    format: OutputFormat,
) -> Result<String, SpotterError> {
    match format {
        OutputFormat::Pretty => Ok(format_started_pretty(state)),
        OutputFormat::Json => to_json(state),
    }
}

/// Format a saved workout's acknowledgment based on output format
///
/// # Errors
///
/// Returns `SpotterError::Parse` if JSON serialization fails.
pub fn format_finished(ack: &LogAck, format: OutputFormat) -> Result<String, SpotterError> {
    match format {
        OutputFormat::Pretty => Ok(format_finished_pretty(ack)),
        OutputFormat::Json => to_json(ack),
    }
}

/// Format workout history based on output format
///
/// # Errors
///
/// Returns `SpotterError::Parse` if JSON serialization fails.
pub fn format_history(
    logs: &[LogSummary],
    unit: WeightUnit,
    format: OutputFormat,
) -> Result<String, SpotterError> {
    match format {
        OutputFormat::Pretty => Ok(format_history_pretty(logs, unit)),
        OutputFormat::Json => format_history_json(logs),
    }
}

/// Format one logged workout based on output format
///
/// # Errors
///
/// Returns `SpotterError::Parse` if JSON serialization fails.
pub fn format_log(
    id: i64,
    log: &LogWorkoutRequest,
    unit: WeightUnit,
    format: OutputFormat,
) -> Result<String, SpotterError> {
    match format {
        OutputFormat::Pretty => Ok(format_log_pretty(id, log, unit)),
        OutputFormat::Json => format_log_json(id, log),
    }
}
