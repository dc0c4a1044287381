//! Command implementations for spotter.
//!
//! Each command returns the text to print; errors are reported by `main`.

mod completions;
mod history;
mod plan;
mod set;
mod workout;

pub use completions::{completions, generate_completions};
pub use history::history;
pub use plan::plan;
pub use set::set;
pub use workout::{cancel, finish, pause, resume, start, status};

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::error::SpotterError;
use crate::output::format_view;
use crate::plans::PlanLibrary;
use crate::session::{Direction, SystemClock};
use crate::storage::{LogStore, SessionCache};
use crate::tracker::WorkoutTracker;

/// The tracker as wired by the command line.
pub type Tracker = WorkoutTracker<PlanLibrary, LogStore, SystemClock>;

/// Open the tracker over the default data directory.
///
/// # Errors
///
/// Returns an error if the plan library, database or cache cannot be opened.
pub fn open_tracker() -> Result<Tracker, SpotterError> {
    Ok(WorkoutTracker::new(
        PlanLibrary::new()?,
        LogStore::new()?,
        SessionCache::new()?,
        SystemClock,
    ))
}

/// Render the tracker's current view.
pub(crate) fn render_view(
    tracker: &Tracker,
    config: &Config,
    format: OutputFormat,
) -> Result<String, SpotterError> {
    let view = tracker.view().ok_or(SpotterError::NoActiveWorkout)?;
    format_view(&view, config.workout.weight_unit, format)
}

/// Execute next command
///
/// # Errors
///
/// Returns an error if there is no workout in progress.
pub fn next(config: &Config, format: OutputFormat) -> Result<String, SpotterError> {
    navigate(config, Direction::Next, format)
}

/// Execute prev command
///
/// # Errors
///
/// Returns an error if there is no workout in progress.
pub fn prev(config: &Config, format: OutputFormat) -> Result<String, SpotterError> {
    navigate(config, Direction::Prev, format)
}

fn navigate(
    config: &Config,
    direction: Direction,
    format: OutputFormat,
) -> Result<String, SpotterError> {
    let mut tracker = open_tracker()?;
    tracker.navigate(direction)?;
    render_view(&tracker, config, format)
}
