//! Set timer and logging commands.

use colored::Colorize;

use super::{open_tracker, render_view, Tracker};
use crate::cli::args::{OutputFormat, SetCommands, SetTarget};
use crate::config::Config;
use crate::error::{SessionError, SpotterError};
use crate::output::format_transition;
use crate::session::{LogField, LogValue, SetAction};

/// Execute set subcommands.
///
/// # Errors
///
/// Returns an error if there is no workout in progress or the engine
/// rejects the action.
pub fn set(
    config: &Config,
    cmd: SetCommands,
    format: OutputFormat,
) -> Result<String, SpotterError> {
    let mut tracker = open_tracker()?;

    match cmd {
        SetCommands::Start(target) => apply(&mut tracker, target, SetAction::Start, format),
        SetCommands::Pause(target) => apply(&mut tracker, target, SetAction::Pause, format),
        SetCommands::Finish(target) => apply(&mut tracker, target, SetAction::Finish, format),
        SetCommands::Reset(target) => apply(&mut tracker, target, SetAction::Reset, format),
        SetCommands::Log {
            target,
            weight,
            reps,
            rpe,
        } => log(&mut tracker, config, target, weight, reps, rpe, format),
    }
}

/// Resolve a 1-based target to engine indices.
fn resolve(tracker: &Tracker, target: SetTarget) -> Result<(usize, usize), SpotterError> {
    let state = tracker.active().ok_or(SpotterError::NoActiveWorkout)?;
    let exercise = target
        .exercise
        .map_or(state.current_exercise_index, |n| n as usize - 1);
    Ok((exercise, target.set as usize - 1))
}

fn apply(
    tracker: &mut Tracker,
    target: SetTarget,
    action: SetAction,
    format: OutputFormat,
) -> Result<String, SpotterError> {
    let (exercise, set) = resolve(tracker, target)?;
    let transition = tracker.set_action(exercise, set, action)?;

    let name = tracker
        .active()
        .and_then(|state| state.logged_data.get(exercise))
        .map(|ex| ex.name.clone())
        .unwrap_or_default();
    let view = tracker.view();
    format_transition(&transition, &name, target.set, view.as_ref(), format)
}

fn log(
    tracker: &mut Tracker,
    config: &Config,
    target: SetTarget,
    weight: Option<String>,
    reps: Option<String>,
    rpe: Option<String>,
    format: OutputFormat,
) -> Result<String, SpotterError> {
    let (exercise, set) = resolve(tracker, target)?;

    let fields: Vec<(LogField, String)> = [
        (LogField::Weight, weight),
        (LogField::Reps, reps),
        (LogField::Rpe, rpe),
    ]
    .into_iter()
    .filter_map(|(field, value)| value.map(|v| (field, v)))
    .collect();

    if fields.is_empty() {
        return Err(SpotterError::Config(
            "Nothing to log. Pass --weight, --reps or --rpe.".to_string(),
        ));
    }

    for (field, value) in fields {
        tracker.update_log(exercise, set, field, LogValue::from_input(&value))?;
    }

    match format {
        OutputFormat::Json => render_view(tracker, config, format),
        OutputFormat::Pretty => {
            let state = tracker.active().ok_or(SpotterError::NoActiveWorkout)?;
            let logged = state
                .set(exercise, set)
                .ok_or(SessionError::OutOfRange { exercise, set })?;
            let name = &state.logged_data[exercise].name;
            Ok(format!(
                "{} {} set {}: {} {} x {} RPE {}",
                "✎".cyan(),
                name.bold(),
                logged.set_number,
                logged.weight_kg,
                config.workout.weight_unit.label(),
                logged.reps,
                logged.rpe
            ))
        }
    }
}
