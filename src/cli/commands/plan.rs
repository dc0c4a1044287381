//! Plan commands.

use super::open_tracker;
use crate::cli::args::{OutputFormat, PlanCommands};
use crate::config::Config;
use crate::error::SpotterError;
use crate::output::format_plan;

/// Execute plan subcommands.
///
/// # Errors
///
/// Returns an error if the plan cannot be fetched.
pub fn plan(
    config: &Config,
    cmd: PlanCommands,
    format: OutputFormat,
) -> Result<String, SpotterError> {
    let tracker = open_tracker()?;

    let (split, routine) = match cmd {
        PlanCommands::Show { split } => {
            let split = split.unwrap_or(config.workout.default_split);
            (split, tracker.current_plan(split)?)
        }
        PlanCommands::Regenerate { split } => {
            let split = split.unwrap_or(config.workout.default_split);
            (split, tracker.regenerate_plan(split)?)
        }
    };

    format_plan(&routine, split, config.workout.weight_unit, format)
}
