//! Workout lifecycle commands.

use std::io::Write;

use colored::Colorize;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};

use super::{open_tracker, render_view};
use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::error::SpotterError;
use crate::output::{format_finished, format_started, format_view, to_json};
use crate::session::{tick_interval, Clock, SystemClock, WorkoutSplit, WorkoutView};
use crate::storage::SessionCache;

/// Start a workout.
///
/// # Errors
///
/// Returns an error if a workout is in progress or the plan cannot be fetched.
pub fn start(
    config: &Config,
    split: Option<WorkoutSplit>,
    format: OutputFormat,
) -> Result<String, SpotterError> {
    let split = split.unwrap_or(config.workout.default_split);
    let mut tracker = open_tracker()?;
    let state = tracker.start_workout(split)?;
    format_started(state, format)
}

/// Show the workout in progress.
///
/// # Errors
///
/// Returns an error if there is no workout in progress.
pub fn status(config: &Config, watch: bool, format: OutputFormat) -> Result<String, SpotterError> {
    if watch {
        return watch_status(config, format);
    }
    let tracker = open_tracker()?;
    render_view(&tracker, config, format)
}

/// Redraw the status until no set in view is running.
///
/// The cache is re-read on every tick so actions from another terminal show up.
fn watch_status(config: &Config, format: OutputFormat) -> Result<String, SpotterError> {
    let cache = SessionCache::new()?;
    let clock = SystemClock;
    let mut stdout = std::io::stdout();

    loop {
        let state = cache
            .load_active_session()
            .ok_or(SpotterError::NoActiveWorkout)?;
        let view = WorkoutView::project(&state, clock.now_ms());
        let rendered = format_view(&view, config.workout.weight_unit, format)?;

        if format == OutputFormat::Pretty {
            execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        writeln!(stdout, "{rendered}")?;
        stdout.flush()?;

        match tick_interval(&state, config.workout.tick_interval_ms) {
            Some(interval) => std::thread::sleep(interval),
            None => return Ok(String::new()),
        }
    }
}

/// Pause the whole workout.
///
/// # Errors
///
/// Returns an error if there is no workout in progress or it is already paused.
pub fn pause(config: &Config, format: OutputFormat) -> Result<String, SpotterError> {
    let mut tracker = open_tracker()?;
    let paused_set = tracker.pause_workout()?;

    match format {
        OutputFormat::Json => render_view(&tracker, config, format),
        OutputFormat::Pretty => {
            let mut output = vec!["⏸ Workout paused".yellow().to_string()];
            if paused_set.is_some() {
                output.push("   The running set was paused too".dimmed().to_string());
            }
            output.push("   Use 'spotter resume' to continue".dimmed().to_string());
            Ok(output.join("\n"))
        }
    }
}

/// Resume a paused workout.
///
/// # Errors
///
/// Returns an error if there is no workout in progress or it is not paused.
pub fn resume(config: &Config, format: OutputFormat) -> Result<String, SpotterError> {
    let mut tracker = open_tracker()?;
    tracker.resume_workout()?;

    match format {
        OutputFormat::Json => render_view(&tracker, config, format),
        OutputFormat::Pretty => Ok("▶ Workout resumed".green().to_string()),
    }
}

/// Finish the workout and save it.
///
/// # Errors
///
/// Returns an error if there is no workout in progress or saving fails.
pub fn finish(notes: Option<String>, format: OutputFormat) -> Result<String, SpotterError> {
    let mut tracker = open_tracker()?;
    let ack = tracker.finish_workout(notes)?;
    format_finished(&ack, format)
}

/// Discard the workout in progress.
///
/// # Errors
///
/// Returns an error without `--force`, or if there is no workout in progress.
pub fn cancel(force: bool, format: OutputFormat) -> Result<String, SpotterError> {
    let mut tracker = open_tracker()?;
    if tracker.active().is_none() {
        return Err(SpotterError::NoActiveWorkout);
    }
    if !force {
        return Err(SpotterError::Config(
            "This will discard the workout in progress.\nUse --force to confirm.".to_string(),
        ));
    }

    let state = tracker.cancel_workout()?;
    match format {
        OutputFormat::Json => to_json(&serde_json::json!({
            "cancelled": state.workout_id,
        })),
        OutputFormat::Pretty => Ok(format!(
            "⏹ {} workout discarded",
            state.split.display_name()
        )),
    }
}
