use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::session::WorkoutSplit;

#[derive(Parser)]
#[command(name = "spotter")]
#[command(about = "A terminal workout logger with per-set timers")]
#[command(long_about = "spotter - live workout logging in the terminal

Pick a split, start a workout, and time every set as you go. Weight, reps
and RPE are logged per set, and the finished workout is saved to your
local history.

QUICK START:
  spotter plan show --split push    Preview today's push routine
  spotter start --split push        Start the workout
  spotter set start 1               Start set 1 of the current exercise
  spotter set finish 1              Finish it
  spotter set log 1 --weight 60 --reps 8
  spotter next                      Move to the next exercise
  spotter finish                    Save the workout

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  spotter <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show or regenerate the workout plan
    ///
    /// Plans are cached, so `plan show` returns the same routine until
    /// you regenerate it or ask for a different split.
    ///
    /// # Examples
    ///
    ///   spotter plan show                 Plan for the default split
    ///   spotter plan show --split legs    Plan for leg day
    ///   spotter plan regenerate -s pull   Fetch a fresh pull routine
    Plan(PlanArgs),

    /// Start a workout
    ///
    /// Builds a session from the current plan for the split. Only one
    /// workout can be in progress at a time.
    ///
    /// # Examples
    ///
    ///   spotter start                 Use the default split
    ///   spotter start --split full-body
    Start {
        /// Workout split (defaults to `workout.default_split`)
        #[arg(long, short = 's', value_enum)]
        split: Option<WorkoutSplit>,
    },

    /// Show the current exercise and its sets
    ///
    /// Elapsed times are live. With --watch the view refreshes every
    /// second while a set is running and exits once none is.
    #[command(alias = "st")]
    Status {
        /// Refresh while a set is running
        #[arg(long, short = 'w')]
        watch: bool,
    },

    /// Time and log individual sets
    ///
    /// Set and exercise numbers start at 1. The exercise defaults to the
    /// one currently in view.
    ///
    /// # Examples
    ///
    ///   spotter set start 1
    ///   spotter set pause 1
    ///   spotter set finish 2 --exercise 3
    ///   spotter set reset 2
    ///   spotter set log 1 --weight 60 --reps 8 --rpe 8
    Set(SetArgs),

    /// Move to the next exercise
    #[command(alias = "n")]
    Next,

    /// Move to the previous exercise
    #[command(alias = "p")]
    Prev,

    /// Pause the whole workout
    ///
    /// The running set, if any, is paused too. Sets cannot be started
    /// until the workout is resumed.
    Pause,

    /// Resume a paused workout
    Resume,

    /// Finish the workout and save it to history
    ///
    /// Only sets that were started and have a weight or rep count are
    /// saved. If saving fails the workout stays in progress.
    Finish {
        /// Notes for this workout
        #[arg(long, short = 'n')]
        notes: Option<String>,
    },

    /// Discard the workout in progress without saving it
    Cancel {
        /// Confirm discarding the workout
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Show finished workouts
    ///
    /// # Examples
    ///
    ///   spotter history               Ten most recent workouts
    ///   spotter history --limit 30
    ///   spotter history --id 4        Full log of one workout
    #[command(alias = "h")]
    History {
        /// Maximum number of workouts to list
        #[arg(long, short = 'l', default_value_t = 10)]
        limit: usize,

        /// Show one logged workout in full
        #[arg(long)]
        id: Option<i64>,
    },

    /// Generate shell completions
    ///
    /// Example: spotter completions zsh > ~/.zsh/completions/_spotter
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Launch the live workout screen
    ///
    /// # Keybindings
    ///
    ///   h/l or left/right  Previous/next exercise
    ///   j/k or up/down     Select a set
    ///   s                  Start the selected set
    ///   p                  Pause the selected set
    ///   f                  Finish the selected set
    ///   r                  Reset the selected set
    ///   P                  Pause or resume the workout
    ///   q or Esc           Quit (the workout stays in progress)
    Tui,
}

#[derive(Args)]
pub struct PlanArgs {
    #[command(subcommand)]
    pub command: PlanCommands,
}

/// Plan subcommands.
#[derive(Subcommand)]
pub enum PlanCommands {
    /// Show the plan for a split, fetching it if not cached
    Show {
        /// Workout split (defaults to `workout.default_split`)
        #[arg(long, short = 's', value_enum)]
        split: Option<WorkoutSplit>,
    },

    /// Fetch a fresh plan for a split
    Regenerate {
        /// Workout split (defaults to `workout.default_split`)
        #[arg(long, short = 's', value_enum)]
        split: Option<WorkoutSplit>,
    },
}

#[derive(Args)]
pub struct SetArgs {
    #[command(subcommand)]
    pub command: SetCommands,
}

/// Which set a command applies to.
#[derive(Args, Clone, Copy)]
pub struct SetTarget {
    /// Set number, starting at 1
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub set: u32,

    /// Exercise number, starting at 1 (defaults to the current exercise)
    #[arg(long, short = 'e', value_parser = clap::value_parser!(u32).range(1..))]
    pub exercise: Option<u32>,
}

/// Set subcommands.
#[derive(Subcommand)]
pub enum SetCommands {
    /// Start or continue timing a set
    Start(SetTarget),

    /// Pause a running set
    Pause(SetTarget),

    /// Finish a set
    Finish(SetTarget),

    /// Reset a set to pending, clearing its time
    Reset(SetTarget),

    /// Record weight, reps or RPE for a set
    ///
    /// Values are kept as typed and converted to numbers when the
    /// workout is saved. Pass an empty string to clear a field.
    Log {
        #[command(flatten)]
        target: SetTarget,

        /// Weight lifted
        #[arg(long, short = 'w')]
        weight: Option<String>,

        /// Repetitions performed
        #[arg(long, short = 'r')]
        reps: Option<String>,

        /// Rate of perceived exertion (1-10)
        #[arg(long)]
        rpe: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_set_start() {
        let cli = Cli::try_parse_from(["spotter", "set", "start", "2", "-e", "3"]).unwrap();
        match cli.command {
            Commands::Set(args) => match args.command {
                SetCommands::Start(target) => {
                    assert_eq!(target.set, 2);
                    assert_eq!(target.exercise, Some(3));
                }
                _ => panic!("expected set start"),
            },
            _ => panic!("expected set command"),
        }
    }

    #[test]
    fn test_set_numbers_start_at_one() {
        assert!(Cli::try_parse_from(["spotter", "set", "finish", "0"]).is_err());
    }

    #[test]
    fn test_parse_split_and_output() {
        let cli = Cli::try_parse_from(["spotter", "-o", "json", "start", "--split", "full-body"])
            .unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
        match cli.command {
            Commands::Start { split } => assert_eq!(split, Some(WorkoutSplit::FullBody)),
            _ => panic!("expected start"),
        }
    }
}
