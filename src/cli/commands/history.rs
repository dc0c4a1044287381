//! Workout history command.

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::error::SpotterError;
use crate::output::{format_history, format_log};
use crate::storage::LogStore;

/// List finished workouts, or show one in full.
///
/// # Errors
///
/// Returns an error if the database cannot be read or the log does not exist.
pub fn history(
    config: &Config,
    limit: usize,
    id: Option<i64>,
    format: OutputFormat,
) -> Result<String, SpotterError> {
    let store = LogStore::new()?;
    let unit = config.workout.weight_unit;

    match id {
        Some(id) => {
            let log = store
                .get(id)?
                .ok_or_else(|| SpotterError::NotFound(format!("Workout log #{id}")))?;
            format_log(id, &log, unit, format)
        }
        None => format_history(&store.recent(limit)?, unit, format),
    }
}
