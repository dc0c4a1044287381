//! The live workout session.
//!
//! [`ActiveWorkoutState`] is the whole session aggregate. All timer state
//! lives here, including the pointer to the one running set, so the
//! single-active-set rule can be checked by inspecting this value alone.
//!
//! Set transitions go through [`ActiveWorkoutState::apply_set_action`]:
//!
//! 1. address check (out-of-range is rejected)
//! 2. session guards (workout paused, another set running)
//! 3. the set's own transition
//! 4. post-conditions on the owning exercise
//!
//! A rejection at any step leaves the session untouched.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::clock::Millis;
use super::logged::{LogField, LogValue, LoggedExercise, LoggedSet};
use super::routine::{Exercise, WorkoutRoutine, WorkoutSplit};
use super::status::TimerStatus;
use crate::error::SessionError;

/// Timer action on a single set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetAction {
    Start,
    Pause,
    Finish,
    Reset,
}

impl std::fmt::Display for SetAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::Pause => "pause",
            Self::Finish => "finish",
            Self::Reset => "reset",
        })
    }
}

/// Exercise navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// The currently running set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSetInfo {
    pub exercise_index: usize,
    pub set_index: usize,
}

impl ActiveSetInfo {
    #[must_use]
    pub const fn new(exercise_index: usize, set_index: usize) -> Self {
        Self {
            exercise_index,
            set_index,
        }
    }
}

/// What an accepted set action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SetTransition {
    pub action: SetAction,
    pub from: TimerStatus,
    pub to: TimerStatus,
    /// The owning exercise went pending -> active
    pub exercise_started: bool,
    /// The owning exercise went active -> completed
    pub exercise_completed: bool,
}

/// The entire live session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveWorkoutState {
    pub workout_id: String,
    #[serde(rename = "startTime")]
    pub start_time: Millis,
    /// Start of the current un-paused stretch of the workout
    #[serde(
        rename = "currentSessionStartTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub current_session_start_time: Option<Millis>,
    #[serde(rename = "totalActiveDuration_ms", default)]
    pub total_active_ms: Millis,
    #[serde(rename = "isPaused", default)]
    pub is_paused: bool,
    pub routine: WorkoutRoutine,
    #[serde(rename = "currentExerciseIndex")]
    pub current_exercise_index: usize,
    #[serde(rename = "loggedData")]
    pub logged_data: Vec<LoggedExercise>,
    pub split: WorkoutSplit,
    #[serde(rename = "activeSet", default, skip_serializing_if = "Option::is_none")]
    pub active_set: Option<ActiveSetInfo>,
}

impl ActiveWorkoutState {
    /// Start a session from a routine.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidRoutine` if the routine has no
    /// exercises or an exercise prescribes zero sets.
    pub fn start(
        routine: WorkoutRoutine,
        split: WorkoutSplit,
        now: Millis,
    ) -> Result<Self, SessionError> {
        routine.validate()?;

        let logged_data = routine
            .routine
            .iter()
            .map(LoggedExercise::from_exercise)
            .collect();

        Ok(Self {
            workout_id: routine.id.clone(),
            start_time: now,
            current_session_start_time: Some(now),
            total_active_ms: 0,
            is_paused: false,
            routine,
            current_exercise_index: 0,
            logged_data,
            split,
            active_set: None,
        })
    }

    /// Number of exercises in the session.
    #[must_use]
    pub fn exercise_count(&self) -> usize {
        self.logged_data.len()
    }

    /// The exercise currently in view.
    #[must_use]
    pub fn current_exercise(&self) -> Option<&LoggedExercise> {
        self.logged_data.get(self.current_exercise_index)
    }

    /// The prescription for the exercise currently in view.
    #[must_use]
    pub fn current_plan(&self) -> Option<&Exercise> {
        self.routine.routine.get(self.current_exercise_index)
    }

    /// Look up a set.
    #[must_use]
    pub fn set(&self, exercise: usize, set: usize) -> Option<&LoggedSet> {
        self.logged_data.get(exercise)?.sets.get(set)
    }

    fn check_address(&self, exercise: usize, set: usize) -> Result<(), SessionError> {
        if self.set(exercise, set).is_some() {
            Ok(())
        } else {
            warn!(exercise, set, "Ignoring action on a set that does not exist");
            Err(SessionError::OutOfRange { exercise, set })
        }
    }

    /// Apply a timer action to one set.
    ///
    /// # Errors
    ///
    /// - `SessionError::OutOfRange` if the address does not exist
    /// - `SessionError::WorkoutPaused` when starting while the workout is paused
    /// - `SessionError::SetAlreadyActive` when starting while another set runs
    /// - `SessionError::InvalidTransition` if the set's status does not admit
    ///   the action
    pub fn apply_set_action(
        &mut self,
        exercise: usize,
        set: usize,
        action: SetAction,
        now: Millis,
    ) -> Result<SetTransition, SessionError> {
        self.check_address(exercise, set)?;
        let here = ActiveSetInfo::new(exercise, set);

        if action == SetAction::Start {
            if self.is_paused {
                return Err(SessionError::WorkoutPaused);
            }
            if let Some(running) = self.running_set().filter(|running| *running != here) {
                warn!(
                    exercise,
                    set,
                    running_exercise = running.exercise_index,
                    running_set = running.set_index,
                    "Blocked start while another set is active"
                );
                return Err(SessionError::SetAlreadyActive {
                    exercise: running.exercise_index,
                    set: running.set_index,
                });
            }
        }

        let logged = &mut self.logged_data[exercise];
        let target = &mut logged.sets[set];
        let from = target.status;
        target.apply(action, now)?;
        let to = target.status;

        // Post-conditions on the owning exercise.
        let exercise_started = action == SetAction::Start && logged.mark_started(now);
        let exercise_completed = logged.reconcile_completion();

        if to == TimerStatus::Active {
            self.active_set = Some(here);
        } else if self.active_set == Some(here) {
            self.active_set = None;
        }

        debug!(
            exercise,
            set,
            %action,
            %from,
            %to,
            exercise_started,
            exercise_completed,
            "Set transition"
        );

        Ok(SetTransition {
            action,
            from,
            to,
            exercise_started,
            exercise_completed,
        })
    }

    /// The active set pointer, if it still points at a running set.
    fn running_set(&self) -> Option<ActiveSetInfo> {
        self.active_set.filter(|info| {
            self.set(info.exercise_index, info.set_index)
                .is_some_and(|s| s.status == TimerStatus::Active)
        })
    }

    /// Start or resume a set.
    ///
    /// # Errors
    ///
    /// See [`Self::apply_set_action`].
    pub fn start_set(
        &mut self,
        exercise: usize,
        set: usize,
        now: Millis,
    ) -> Result<SetTransition, SessionError> {
        self.apply_set_action(exercise, set, SetAction::Start, now)
    }

    /// Pause a running set.
    ///
    /// # Errors
    ///
    /// See [`Self::apply_set_action`].
    pub fn pause_set(
        &mut self,
        exercise: usize,
        set: usize,
        now: Millis,
    ) -> Result<SetTransition, SessionError> {
        self.apply_set_action(exercise, set, SetAction::Pause, now)
    }

    /// Finish a running or paused set.
    ///
    /// # Errors
    ///
    /// See [`Self::apply_set_action`].
    pub fn finish_set(
        &mut self,
        exercise: usize,
        set: usize,
        now: Millis,
    ) -> Result<SetTransition, SessionError> {
        self.apply_set_action(exercise, set, SetAction::Finish, now)
    }

    /// Reset a set back to pending.
    ///
    /// # Errors
    ///
    /// See [`Self::apply_set_action`].
    pub fn reset_set(
        &mut self,
        exercise: usize,
        set: usize,
        now: Millis,
    ) -> Result<SetTransition, SessionError> {
        self.apply_set_action(exercise, set, SetAction::Reset, now)
    }

    /// Move the view to the next or previous exercise, clamped to bounds.
    ///
    /// Returns the new index. Timer state is never touched.
    pub fn navigate(&mut self, direction: Direction) -> usize {
        let last = self.exercise_count().saturating_sub(1);
        self.current_exercise_index = match direction {
            Direction::Next => (self.current_exercise_index + 1).min(last),
            Direction::Prev => self.current_exercise_index.saturating_sub(1),
        };
        self.current_exercise_index
    }

    /// Overwrite one editable field of a set.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::OutOfRange` if the address does not exist.
    pub fn update_log(
        &mut self,
        exercise: usize,
        set: usize,
        field: LogField,
        value: LogValue,
    ) -> Result<(), SessionError> {
        self.check_address(exercise, set)?;
        self.logged_data[exercise].sets[set].set_field(field, value);
        Ok(())
    }

    /// Pause the whole workout, pausing the running set if there is one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::WorkoutNotRunning` if already paused.
    pub fn pause_workout(&mut self, now: Millis) -> Result<Option<SetTransition>, SessionError> {
        if self.is_paused {
            return Err(SessionError::WorkoutNotRunning);
        }

        let paused_set = match self.running_set() {
            Some(info) => Some(self.pause_set(info.exercise_index, info.set_index, now)?),
            None => None,
        };

        if let Some(stretch_start) = self.current_session_start_time.take() {
            self.total_active_ms += (now - stretch_start).max(0);
        }
        self.is_paused = true;
        debug!(total_active_ms = self.total_active_ms, "Workout paused");
        Ok(paused_set)
    }

    /// Resume a paused workout.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::WorkoutNotPaused` if the workout is running.
    pub fn resume_workout(&mut self, now: Millis) -> Result<(), SessionError> {
        if !self.is_paused {
            return Err(SessionError::WorkoutNotPaused);
        }
        self.is_paused = false;
        self.current_session_start_time = Some(now);
        debug!("Workout resumed");
        Ok(())
    }

    /// Workout time excluding workout-level pauses.
    #[must_use]
    pub fn active_duration_ms(&self, now: Millis) -> Millis {
        let open = self
            .current_session_start_time
            .map_or(0, |stretch_start| (now - stretch_start).max(0));
        self.total_active_ms + open
    }

    /// Wall-clock time since the workout started.
    #[must_use]
    pub fn elapsed_ms(&self, now: Millis) -> Millis {
        (now - self.start_time).max(0)
    }

    /// Whether any set in the session is running.
    #[must_use]
    pub fn has_running_set(&self) -> bool {
        self.running_set().is_some()
    }

    /// Check structural invariants of a restored session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Corrupted` describing the first violation.
    pub fn validate(&self) -> Result<(), SessionError> {
        let corrupted =
            |msg: String| -> Result<(), SessionError> { Err(SessionError::Corrupted(msg)) };

        if self.logged_data.is_empty() {
            return corrupted("session has no exercises".to_string());
        }
        if self.logged_data.len() != self.routine.len() {
            return corrupted(format!(
                "{} logged exercises for {} planned",
                self.logged_data.len(),
                self.routine.len()
            ));
        }
        if self.current_exercise_index >= self.logged_data.len() {
            return corrupted(format!(
                "current exercise {} out of range",
                self.current_exercise_index
            ));
        }
        if self.is_paused && self.current_session_start_time.is_some() {
            return corrupted("paused workout has an open stretch".to_string());
        }

        let mut running = Vec::new();
        let planned = self.routine.routine.iter();
        for (ei, (exercise, plan)) in self.logged_data.iter().zip(planned).enumerate() {
            if u32::try_from(exercise.sets.len()).ok() != Some(plan.target_sets) {
                return corrupted(format!(
                    "exercise {} has {} sets for {} planned",
                    ei + 1,
                    exercise.sets.len(),
                    plan.target_sets
                ));
            }
            for (si, set) in exercise.sets.iter().enumerate() {
                if !set.is_consistent() {
                    return corrupted(format!(
                        "set {} of exercise {} has inconsistent timestamps",
                        si + 1,
                        ei + 1
                    ));
                }
                if set.status == TimerStatus::Active {
                    running.push(ActiveSetInfo::new(ei, si));
                }
            }
        }

        match running.as_slice() {
            [] if self.active_set.is_none() => Ok(()),
            [only] if self.active_set == Some(*only) => Ok(()),
            [] | [_] => corrupted("active set pointer does not match set status".to_string()),
            _ => corrupted(format!("{} sets are active", running.len())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routine(sets: &[u32]) -> WorkoutRoutine {
        WorkoutRoutine {
            id: "push-2026-10-14".to_string(),
            date: "2026-10-14".to_string(),
            ai_insight: Some("Go heavy today".to_string()),
            routine: sets
                .iter()
                .enumerate()
                .map(|(i, n)| {
                    let number = i + 1;
                    Exercise::new(&format!("e{number}"), &format!("Exercise {number}"), *n, "8")
                })
                .collect(),
        }
    }

    fn session(sets: &[u32]) -> ActiveWorkoutState {
        ActiveWorkoutState::start(routine(sets), WorkoutSplit::Push, 0).unwrap()
    }

    fn active_count(state: &ActiveWorkoutState) -> usize {
        state
            .logged_data
            .iter()
            .flat_map(|e| e.sets.iter())
            .filter(|s| s.status == TimerStatus::Active)
            .count()
    }

    #[test]
    fn test_start_builds_pending_sets() {
        let state = session(&[3, 2]);
        assert_eq!(state.exercise_count(), 2);
        assert_eq!(state.logged_data[0].sets.len(), 3);
        assert_eq!(state.logged_data[1].sets.len(), 2);
        assert_eq!(state.workout_id, "push-2026-10-14");
        assert_eq!(state.current_session_start_time, Some(0));
        assert!(state.active_set.is_none());
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_start_rejects_empty_routine() {
        let err = ActiveWorkoutState::start(routine(&[]), WorkoutSplit::Push, 0).unwrap_err();
        assert!(matches!(err, SessionError::InvalidRoutine(_)));
    }

    #[test]
    fn test_single_active_set_across_exercises() {
        let mut state = session(&[1, 1]);
        state.start_set(0, 0, 0).unwrap();

        let before = state.clone();
        let err = state.start_set(1, 0, 1_000).unwrap_err();
        assert_eq!(err, SessionError::SetAlreadyActive { exercise: 0, set: 0 });
        assert_eq!(state, before);
        assert_eq!(state.logged_data[1].sets[0].status, TimerStatus::Pending);
        assert_eq!(active_count(&state), 1);
    }

    #[test]
    fn test_start_after_pause_elsewhere_is_allowed() {
        let mut state = session(&[2]);
        state.start_set(0, 0, 0).unwrap();
        state.pause_set(0, 0, 1_000).unwrap();
        assert!(state.active_set.is_none());

        state.start_set(0, 1, 2_000).unwrap();
        assert_eq!(state.active_set, Some(ActiveSetInfo::new(0, 1)));
        assert_eq!(active_count(&state), 1);
    }

    #[test]
    fn test_timing_scenario() {
        let mut state = session(&[1]);
        state.start_set(0, 0, 0).unwrap();
        state.pause_set(0, 0, 5_000).unwrap();
        assert_eq!(state.logged_data[0].sets[0].elapsed_ms, 5_000);

        state.start_set(0, 0, 6_000).unwrap();
        state.finish_set(0, 0, 9_000).unwrap();
        let set = &state.logged_data[0].sets[0];
        assert_eq!(set.elapsed_ms, 8_000);
        assert_eq!(set.end_time, Some(9_000));
    }

    #[test]
    fn test_first_start_activates_exercise() {
        let mut state = session(&[2]);
        let t = state.start_set(0, 1, 1_234).unwrap();
        assert!(t.exercise_started);
        assert_eq!(state.logged_data[0].status, TimerStatus::Active);
        assert_eq!(state.logged_data[0].start_time, Some(1_234));

        state.pause_set(0, 1, 2_000).unwrap();
        let t = state.start_set(0, 1, 3_000).unwrap();
        assert!(!t.exercise_started);
        assert_eq!(state.logged_data[0].start_time, Some(1_234));
    }

    #[test]
    fn test_exercise_completes_once_with_span() {
        let mut state = session(&[3]);
        let starts = [1_000, 20_000, 40_000];
        let mut completions = 0;
        for (i, start) in starts.iter().enumerate() {
            let t = state.start_set(0, i, *start).unwrap();
            completions += usize::from(t.exercise_completed);
            let t = state.finish_set(0, i, start + 5_000).unwrap();
            completions += usize::from(t.exercise_completed);
        }

        let exercise = &state.logged_data[0];
        assert_eq!(completions, 1);
        assert_eq!(exercise.status, TimerStatus::Completed);
        assert_eq!(exercise.elapsed_ms, 45_000 - 1_000);
        assert_eq!(exercise.active_work_ms, Some(15_000));

        // Resetting and redoing a set does not complete it a second time.
        state.reset_set(0, 2, 50_000).unwrap();
        assert_eq!(state.logged_data[0].status, TimerStatus::Completed);
        state.start_set(0, 2, 51_000).unwrap();
        let t = state.finish_set(0, 2, 52_000).unwrap();
        assert!(!t.exercise_completed);
    }

    #[test]
    fn test_finish_while_paused_clears_pointer_only_for_itself() {
        let mut state = session(&[2]);
        state.start_set(0, 0, 0).unwrap();
        state.pause_set(0, 0, 100).unwrap();
        state.start_set(0, 1, 200).unwrap();
        state.finish_set(0, 0, 300).unwrap();
        assert_eq!(state.active_set, Some(ActiveSetInfo::new(0, 1)));
    }

    #[test]
    fn test_reset_running_pointer() {
        let mut state = session(&[1]);
        state.start_set(0, 0, 0).unwrap();
        assert!(matches!(
            state.reset_set(0, 0, 10),
            Err(SessionError::InvalidTransition { .. })
        ));
        state.pause_set(0, 0, 10).unwrap();
        state.reset_set(0, 0, 20).unwrap();
        let set = &state.logged_data[0].sets[0];
        assert_eq!(set.status, TimerStatus::Pending);
        assert_eq!(set.elapsed_ms, 0);
        assert!(state.active_set.is_none());
    }

    #[test]
    fn test_out_of_range_is_rejected_without_change() {
        let mut state = session(&[2]);
        let before = state.clone();

        assert_eq!(
            state.start_set(5, 0, 0).unwrap_err(),
            SessionError::OutOfRange { exercise: 5, set: 0 }
        );
        assert!(state.finish_set(0, 2, 0).is_err());
        assert!(state
            .update_log(0, 9, LogField::Reps, LogValue::Number(5.0))
            .is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn test_navigate_clamps_and_keeps_timers() {
        let mut state = session(&[1, 1, 1]);
        state.start_set(0, 0, 0).unwrap();
        let logged = state.logged_data.clone();

        assert_eq!(state.navigate(Direction::Prev), 0);
        assert_eq!(state.navigate(Direction::Next), 1);
        assert_eq!(state.navigate(Direction::Next), 2);
        assert_eq!(state.navigate(Direction::Next), 2);
        assert_eq!(state.navigate(Direction::Prev), 1);
        assert_eq!(state.logged_data, logged);
    }

    #[test]
    fn test_update_log_is_unconditional() {
        let mut state = session(&[1]);
        state.start_set(0, 0, 0).unwrap();
        state
            .update_log(0, 0, LogField::Weight, LogValue::Number(80.0))
            .unwrap();
        state
            .update_log(0, 0, LogField::Rpe, LogValue::from_input("8"))
            .unwrap();
        let set = &state.logged_data[0].sets[0];
        assert_eq!(set.weight_kg, LogValue::Number(80.0));
        assert_eq!(set.rpe, LogValue::Number(8.0));
        assert_eq!(set.status, TimerStatus::Active);
    }

    #[test]
    fn test_pause_workout_pauses_running_set() {
        let mut state = session(&[1]);
        state.start_set(0, 0, 0).unwrap();

        let paused = state.pause_workout(4_000).unwrap();
        assert_eq!(paused.map(|t| t.to), Some(TimerStatus::Paused));
        assert_eq!(state.logged_data[0].sets[0].elapsed_ms, 4_000);
        assert_eq!(state.total_active_ms, 4_000);
        assert!(state.is_paused);
        assert_eq!(state.start_set(0, 0, 5_000).unwrap_err(), SessionError::WorkoutPaused);
        assert_eq!(state.pause_workout(5_000).unwrap_err(), SessionError::WorkoutNotRunning);

        state.resume_workout(10_000).unwrap();
        assert_eq!(state.active_duration_ms(12_000), 6_000);
        assert_eq!(state.elapsed_ms(12_000), 12_000);
        assert_eq!(state.resume_workout(12_000).unwrap_err(), SessionError::WorkoutNotPaused);
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_invariants_hold_after_every_operation() {
        let mut state = session(&[2, 2]);
        let steps: [(usize, usize, SetAction); 10] = [
            (0, 0, SetAction::Start),
            (1, 0, SetAction::Start),
            (0, 0, SetAction::Pause),
            (1, 0, SetAction::Start),
            (0, 0, SetAction::Finish),
            (1, 0, SetAction::Finish),
            (0, 1, SetAction::Start),
            (0, 1, SetAction::Finish),
            (0, 0, SetAction::Reset),
            (1, 1, SetAction::Pause),
        ];

        for (i, (ex, set, action)) in steps.iter().enumerate() {
            let _ = state.apply_set_action(*ex, *set, *action, i as i64 * 1_000);
            assert!(state.validate().is_ok(), "step {i} broke invariants");
            assert!(active_count(&state) <= 1);
        }
    }

    #[test]
    fn test_validate_detects_corruption() {
        let mut state = session(&[2]);
        state.logged_data[0].sets[0].status = TimerStatus::Active;
        assert!(matches!(state.validate(), Err(SessionError::Corrupted(_))));

        let mut state = session(&[2]);
        state.active_set = Some(ActiveSetInfo::new(0, 1));
        assert!(state.validate().is_err());

        let mut state = session(&[2]);
        state.current_exercise_index = 3;
        assert!(state.validate().is_err());
    }

    #[test]
    fn test_validate_detects_missing_sets() {
        let mut state = session(&[2, 3]);
        state.logged_data[1].sets.clear();
        let err = state.validate().unwrap_err();
        assert_eq!(
            err,
            SessionError::Corrupted("exercise 2 has 0 sets for 3 planned".to_string())
        );

        let mut state = session(&[2]);
        state.logged_data[0].sets.pop();
        assert!(state.validate().is_err());
    }

    #[test]
    fn test_wire_field_names() {
        let mut state = session(&[1]);
        state.start_set(0, 0, 10).unwrap();
        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["startTime"], 0);
        assert_eq!(json["currentExerciseIndex"], 0);
        assert_eq!(json["split"], "PUSH");
        assert_eq!(json["activeSet"]["exerciseIndex"], 0);
        assert_eq!(json["loggedData"][0]["sets"][0]["startTime"], 10);
        assert_eq!(json["loggedData"][0]["sets"][0]["status"], "active");
    }

    #[test]
    fn test_serialization_round_trip() {
        let mut state = session(&[2, 1]);
        state.start_set(0, 0, 100).unwrap();
        state
            .update_log(0, 0, LogField::Weight, LogValue::Number(62.5))
            .unwrap();
        state.finish_set(0, 0, 5_100).unwrap();
        state.start_set(0, 1, 6_000).unwrap();
        state.navigate(Direction::Next);

        let json = serde_json::to_string(&state).unwrap();
        let restored: ActiveWorkoutState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }
}
