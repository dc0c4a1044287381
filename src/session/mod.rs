//! Workout session engine.
//!
//! The timer state machine behind live workout logging:
//! - Per-set start/pause/finish/reset with accumulated active time
//! - One running set across the whole session
//! - Exercise activation and completion derived from its sets
//! - Read-only live projections for display
//! - The finish-workout submission payload

pub mod clock;
pub mod display;
pub mod logged;
pub mod payload;
pub mod routine;
pub mod status;
pub mod workout;

pub use clock::{Clock, ManualClock, Millis, SystemClock};
pub use display::{format_clock, format_duration, needs_tick, tick_interval, WorkoutView};
pub use logged::{LogField, LogValue, LoggedExercise, LoggedSet};
pub use payload::{LogAck, LogWorkoutRequest, SubmittedExercise, SubmittedSet};
pub use routine::{Exercise, WorkoutRoutine, WorkoutSplit};
pub use status::TimerStatus;
pub use workout::{ActiveSetInfo, ActiveWorkoutState, Direction, SetAction, SetTransition};
