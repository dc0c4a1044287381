//! Read-only projections of a session for display.
//!
//! Nothing here mutates the session. Running sets are shown as
//! `stored elapsed + (now - start)`, everything else as stored.

use std::time::Duration;

use serde::Serialize;

use super::clock::Millis;
use super::logged::{LogValue, LoggedSet};
use super::status::TimerStatus;
use super::workout::ActiveWorkoutState;

/// One set as it should be displayed at a given instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetView {
    pub set_number: u32,
    pub status: TimerStatus,
    pub elapsed_ms: Millis,
    pub weight_kg: LogValue,
    pub reps: LogValue,
    pub rpe: LogValue,
}

impl SetView {
    fn project(set: &LoggedSet, now: Millis) -> Self {
        Self {
            set_number: set.set_number,
            status: set.status,
            elapsed_ms: set.live_elapsed_ms(now),
            weight_kg: set.weight_kg.clone(),
            reps: set.reps.clone(),
            rpe: set.rpe.clone(),
        }
    }
}

/// The exercise in view, with its prescription and live set times.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseView {
    pub index: usize,
    pub name: String,
    pub status: TimerStatus,
    pub target_reps: String,
    pub target_weight_kg: Option<f64>,
    pub rest_period_seconds: Option<u32>,
    pub tip: Option<String>,
    pub completed_sets: usize,
    pub sets: Vec<SetView>,
}

/// Snapshot of the whole session at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutView {
    pub workout_id: String,
    pub split: String,
    pub exercise_count: usize,
    pub elapsed_ms: Millis,
    pub active_ms: Millis,
    pub is_paused: bool,
    pub ai_insight: Option<String>,
    pub exercise: Option<ExerciseView>,
}

impl WorkoutView {
    /// Project the session as of `now`.
    #[must_use]
    pub fn project(state: &ActiveWorkoutState, now: Millis) -> Self {
        let exercise = state.current_exercise().map(|logged| {
            let plan = state.current_plan();
            ExerciseView {
                index: state.current_exercise_index,
                name: logged.name.clone(),
                status: logged.status,
                target_reps: plan.map(|p| p.target_reps.clone()).unwrap_or_default(),
                target_weight_kg: plan.and_then(|p| p.target_weight_kg),
                rest_period_seconds: plan.and_then(|p| p.rest_period_seconds),
                tip: plan.and_then(|p| p.tip.clone()),
                completed_sets: logged.completed_sets(),
                sets: logged.sets.iter().map(|s| SetView::project(s, now)).collect(),
            }
        });

        Self {
            workout_id: state.workout_id.clone(),
            split: state.split.display_name().to_string(),
            exercise_count: state.exercise_count(),
            elapsed_ms: state.elapsed_ms(now),
            active_ms: state.active_duration_ms(now),
            is_paused: state.is_paused,
            ai_insight: state.routine.ai_insight.clone(),
            exercise,
        }
    }
}

/// Whether the exercise in view has a running set.
///
/// The display tick should run only while this holds.
#[must_use]
pub fn needs_tick(state: &ActiveWorkoutState) -> bool {
    state
        .current_exercise()
        .is_some_and(|ex| ex.active_set_index().is_some())
}

/// Redraw interval for the session, or `None` when nothing is running.
///
/// The interval is capped at one second.
#[must_use]
pub fn tick_interval(state: &ActiveWorkoutState, configured_ms: u64) -> Option<Duration> {
    needs_tick(state).then(|| Duration::from_millis(configured_ms.clamp(100, 1_000)))
}

/// Format milliseconds as `MM:SS`, or `H:MM:SS` past an hour.
#[must_use]
pub fn format_clock(ms: Millis) -> String {
    let total_seconds = ms.max(0) / 1_000;
    let hours = total_seconds / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Format milliseconds as a short human string (`45s`, `12m 05s`, `1h 03m`).
#[must_use]
pub fn format_duration(ms: Millis) -> String {
    let total_seconds = ms.max(0) / 1_000;
    let hours = total_seconds / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{hours}h {minutes:02}m")
    } else if minutes > 0 {
        format!("{minutes}m {seconds:02}s")
    } else {
        format!("{seconds}s")
    }
}

/// Render `done / total` as a bar of `width` cells.
#[must_use]
pub fn render_progress_bar(done: usize, total: usize, width: usize) -> String {
    let filled = if total == 0 {
        0
    } else {
        (done.min(total) * width) / total
    };
    let empty = width.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
