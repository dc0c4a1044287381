//! The finish-workout submission payload.
//!
//! Built from a borrowed session so that building (and a failing
//! submission) never changes the session.

use serde::{Deserialize, Serialize};

use super::clock::Millis;
use super::logged::{LogValue, LoggedExercise, LoggedSet};
use super::routine::WorkoutSplit;
use super::status::TimerStatus;
use super::workout::ActiveWorkoutState;

/// RPE values outside this range are dropped.
const RPE_RANGE: std::ops::RangeInclusive<f64> = 1.0..=10.0;

/// One cleaned set in a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmittedSet {
    pub set_number: u32,
    pub weight_kg: Option<f64>,
    pub reps: Option<u32>,
    pub rpe: Option<f64>,
    pub status: TimerStatus,
    #[serde(rename = "elapsedTime_ms")]
    pub elapsed_ms: Millis,
    #[serde(rename = "endTime", default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Millis>,
}

/// One cleaned exercise in a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmittedExercise {
    pub exercise_id: String,
    pub name: String,
    pub sets: Vec<SubmittedSet>,
    pub status: TimerStatus,
    #[serde(rename = "startTime", default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Millis>,
    #[serde(rename = "elapsedTime_ms")]
    pub elapsed_ms: Millis,
    #[serde(rename = "activeWorkTime_ms", default, skip_serializing_if = "Option::is_none")]
    pub active_work_ms: Option<Millis>,
}

/// Payload handed to the log sink when a workout is finished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogWorkoutRequest {
    pub workout_routine_id: String,
    pub logged_exercises: Vec<SubmittedExercise>,
    pub start_time: Millis,
    pub end_time: Millis,
    pub total_duration_seconds: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub split: WorkoutSplit,
}

/// Acknowledgment from the log sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogAck {
    pub logged_workout_id: String,
    pub message: String,
}

impl LogWorkoutRequest {
    /// Build the submission for a session finished at `now`.
    #[must_use]
    pub fn from_session(state: &ActiveWorkoutState, now: Millis, notes: Option<String>) -> Self {
        let logged_exercises = state
            .logged_data
            .iter()
            .filter(|ex| ex.status != TimerStatus::Pending)
            .filter_map(|ex| submit_exercise(ex, now))
            .collect();

        Self {
            workout_routine_id: state.routine.id.clone(),
            logged_exercises,
            start_time: state.start_time,
            end_time: now,
            total_duration_seconds: state.elapsed_ms(now) / 1_000,
            notes: notes.filter(|n| !n.trim().is_empty()),
            split: state.split,
        }
    }

    /// Number of submitted sets.
    #[must_use]
    pub fn set_count(&self) -> usize {
        self.logged_exercises.iter().map(|ex| ex.sets.len()).sum()
    }

    /// Total volume: sum of weight x reps over sets that have both.
    #[must_use]
    pub fn total_volume(&self) -> f64 {
        self.logged_exercises
            .iter()
            .flat_map(|ex| ex.sets.iter())
            .filter_map(|s| Some(s.weight_kg? * f64::from(s.reps?)))
            .sum()
    }
}

fn submit_exercise(exercise: &LoggedExercise, now: Millis) -> Option<SubmittedExercise> {
    let sets: Vec<SubmittedSet> = exercise
        .sets
        .iter()
        .filter(|s| s.status != TimerStatus::Pending)
        .filter_map(|s| submit_set(s, now))
        .collect();

    if sets.is_empty() {
        return None;
    }

    Some(SubmittedExercise {
        exercise_id: exercise.exercise_id.clone(),
        name: exercise.name.clone(),
        sets,
        status: TimerStatus::Completed,
        start_time: exercise.start_time,
        elapsed_ms: exercise.elapsed_ms,
        active_work_ms: exercise.active_work_ms,
    })
}

fn submit_set(set: &LoggedSet, now: Millis) -> Option<SubmittedSet> {
    let weight_kg = set.weight_kg.as_f64();
    let reps = coerce_reps(&set.reps);
    if weight_kg.is_none() && reps.is_none() {
        return None;
    }

    Some(SubmittedSet {
        set_number: set.set_number,
        weight_kg,
        reps,
        rpe: set.rpe.as_f64().filter(|r| RPE_RANGE.contains(r)),
        status: set.status,
        elapsed_ms: set.live_elapsed_ms(now),
        end_time: set.end_time,
    })
}

/// Reps must be a whole, non-negative count.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn coerce_reps(value: &LogValue) -> Option<u32> {
    value
        .as_f64()
        .filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n as u32)
}
