//! Logged sets and exercises.
//!
//! A [`LoggedSet`] owns its own timer transitions. A [`LoggedExercise`]
//! aggregates its sets through two post-conditions that the session calls
//! after every set transition: [`LoggedExercise::mark_started`] and
//! [`LoggedExercise::reconcile_completion`].

use serde::{Deserialize, Serialize};

use super::clock::Millis;
use super::routine::Exercise;
use super::status::TimerStatus;
use super::workout::SetAction;
use crate::error::SessionError;

/// A user-entered value: a number, or whatever text was typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogValue {
    Number(f64),
    Text(String),
}

impl Default for LogValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl LogValue {
    /// The empty placeholder value.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Interpret raw input, keeping non-numeric text as typed.
    #[must_use]
    pub fn from_input(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Self::Number(n),
            _ => Self::Text(trimmed.to_string()),
        }
    }

    /// Numeric value, if there is one.
    ///
    /// Empty or unparsable text yields `None`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Number(_) => None,
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    /// Whether nothing has been entered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }
}

impl std::fmt::Display for LogValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Editable field of a logged set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogField {
    Weight,
    Reps,
    Rpe,
}

/// One performed set.
///
/// `start_time` is `Some` only while active, `end_time` only once completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedSet {
    pub set_number: u32,
    #[serde(default)]
    pub weight_kg: LogValue,
    #[serde(default)]
    pub reps: LogValue,
    #[serde(default)]
    pub rpe: LogValue,
    pub status: TimerStatus,
    #[serde(rename = "startTime", default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Millis>,
    #[serde(rename = "elapsedTime_ms", default)]
    pub elapsed_ms: Millis,
    #[serde(rename = "endTime", default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Millis>,
}

impl LoggedSet {
    /// Create a pending set with nothing logged.
    #[must_use]
    pub fn pending(set_number: u32) -> Self {
        Self {
            set_number,
            weight_kg: LogValue::empty(),
            reps: LogValue::empty(),
            rpe: LogValue::empty(),
            status: TimerStatus::Pending,
            start_time: None,
            elapsed_ms: 0,
            end_time: None,
        }
    }

    /// Elapsed active time as of `now`, including the running interval.
    ///
    /// This is a read-only projection; stored time only changes on pause
    /// and finish.
    #[must_use]
    pub fn live_elapsed_ms(&self, now: Millis) -> Millis {
        match (self.status, self.start_time) {
            (TimerStatus::Active, Some(start)) => self.elapsed_ms + (now - start).max(0),
            _ => self.elapsed_ms,
        }
    }

    /// Whether the set can take `action` from its current status.
    #[must_use]
    pub const fn admits(&self, action: SetAction) -> bool {
        match action {
            SetAction::Start => matches!(self.status, TimerStatus::Pending | TimerStatus::Paused),
            SetAction::Pause => matches!(self.status, TimerStatus::Active),
            SetAction::Finish => matches!(self.status, TimerStatus::Active | TimerStatus::Paused),
            SetAction::Reset => match self.status {
                TimerStatus::Paused | TimerStatus::Completed => true,
                TimerStatus::Pending => self.elapsed_ms != 0,
                TimerStatus::Active => false,
            },
        }
    }

    /// Apply a timer action.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` if the current status does
    /// not admit the action. The set is unchanged in that case.
    pub fn apply(&mut self, action: SetAction, now: Millis) -> Result<(), SessionError> {
        if !self.admits(action) {
            return Err(SessionError::InvalidTransition {
                action,
                status: self.status,
            });
        }

        match action {
            SetAction::Start => {
                if self.status == TimerStatus::Pending {
                    self.elapsed_ms = 0;
                }
                self.status = TimerStatus::Active;
                self.start_time = Some(now);
            }
            SetAction::Pause => {
                self.fold_running(now);
                self.status = TimerStatus::Paused;
            }
            SetAction::Finish => {
                self.fold_running(now);
                self.status = TimerStatus::Completed;
                self.end_time = Some(now);
            }
            SetAction::Reset => {
                self.elapsed_ms = 0;
                self.start_time = None;
                self.end_time = None;
                self.status = TimerStatus::Pending;
            }
        }
        Ok(())
    }

    /// Fold the running interval into stored elapsed time and stop the clock.
    fn fold_running(&mut self, now: Millis) {
        if let Some(start) = self.start_time.take() {
            self.elapsed_ms += (now - start).max(0);
        }
    }

    /// Overwrite one editable field.
    pub fn set_field(&mut self, field: LogField, value: LogValue) {
        match field {
            LogField::Weight => self.weight_kg = value,
            LogField::Reps => self.reps = value,
            LogField::Rpe => self.rpe = value,
        }
    }

    /// Check the start/end time invariants.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        let active = matches!(self.status, TimerStatus::Active);
        let completed = matches!(self.status, TimerStatus::Completed);
        active == self.start_time.is_some() && completed == self.end_time.is_some()
    }
}

/// Logging record for one exercise of the routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedExercise {
    pub exercise_id: String,
    pub name: String,
    pub sets: Vec<LoggedSet>,
    pub status: TimerStatus,
    /// First moment any set went active
    #[serde(rename = "startTime", default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Millis>,
    #[serde(rename = "elapsedTime_ms", default)]
    pub elapsed_ms: Millis,
    #[serde(rename = "activeWorkTime_ms", default, skip_serializing_if = "Option::is_none")]
    pub active_work_ms: Option<Millis>,
}

impl LoggedExercise {
    /// Create the logging record for a prescribed exercise.
    #[must_use]
    pub fn from_exercise(exercise: &Exercise) -> Self {
        Self {
            exercise_id: exercise.id.clone(),
            name: exercise.name.clone(),
            sets: (1..=exercise.target_sets).map(LoggedSet::pending).collect(),
            status: TimerStatus::Pending,
            start_time: None,
            elapsed_ms: 0,
            active_work_ms: None,
        }
    }

    /// Activate the exercise on its first set start.
    ///
    /// Returns true if the exercise changed.
    pub fn mark_started(&mut self, now: Millis) -> bool {
        if self.status != TimerStatus::Pending {
            return false;
        }
        self.status = TimerStatus::Active;
        self.start_time = Some(now);
        true
    }

    /// Complete the exercise once every set is completed.
    ///
    /// Exercise duration prefers the wall-clock span from the exercise start
    /// to the latest set end, falling back to summed set time. Returns true
    /// if the exercise changed.
    pub fn reconcile_completion(&mut self) -> bool {
        if self.status != TimerStatus::Active || !self.all_sets_completed() {
            return false;
        }

        let work = self.summed_set_ms();
        let last_end = self.sets.iter().filter_map(|s| s.end_time).max();

        self.status = TimerStatus::Completed;
        self.active_work_ms = Some(work);
        self.elapsed_ms = match (self.start_time, last_end) {
            (Some(start), Some(end)) => (end - start).max(0),
            _ => work,
        };
        true
    }

    /// Whether every set is completed.
    #[must_use]
    pub fn all_sets_completed(&self) -> bool {
        self.sets.iter().all(|s| s.status == TimerStatus::Completed)
    }

    /// Sum of all sets' stored elapsed time.
    #[must_use]
    pub fn summed_set_ms(&self) -> Millis {
        self.sets.iter().map(|s| s.elapsed_ms).sum()
    }

    /// Number of completed sets.
    #[must_use]
    pub fn completed_sets(&self) -> usize {
        self.sets
            .iter()
            .filter(|s| s.status == TimerStatus::Completed)
            .count()
    }

    /// Index of the running set, if any.
    #[must_use]
    pub fn active_set_index(&self) -> Option<usize> {
        self.sets.iter().position(|s| s.status == TimerStatus::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(sets: u32) -> LoggedExercise {
        LoggedExercise::from_exercise(&Exercise::new("e1", "Bench Press", sets, "8-10"))
    }

    #[test]
    fn test_log_value_coercion() {
        assert_eq!(LogValue::Number(62.5).as_f64(), Some(62.5));
        assert_eq!(LogValue::Text(" 80 ".to_string()).as_f64(), Some(80.0));
        assert_eq!(LogValue::Text(String::new()).as_f64(), None);
        assert_eq!(LogValue::Text("bodyweight".to_string()).as_f64(), None);
        assert_eq!(LogValue::Number(f64::NAN).as_f64(), None);
    }

    #[test]
    fn test_log_value_from_input() {
        assert_eq!(LogValue::from_input("12"), LogValue::Number(12.0));
        assert_eq!(
            LogValue::from_input(" failure "),
            LogValue::Text("failure".to_string())
        );
        assert!(LogValue::from_input("").is_empty());
    }

    #[test]
    fn test_log_value_untagged_wire_format() {
        assert_eq!(serde_json::to_string(&LogValue::empty()).unwrap(), "\"\"");
        let v: LogValue = serde_json::from_str("8").unwrap();
        assert_eq!(v, LogValue::Number(8.0));
        let v: LogValue = serde_json::from_str("\"8\"").unwrap();
        assert_eq!(v.as_f64(), Some(8.0));
    }

    #[test]
    fn test_set_pause_accumulates() {
        let mut set = LoggedSet::pending(1);
        set.apply(SetAction::Start, 0).unwrap();
        set.apply(SetAction::Pause, 5_000).unwrap();
        assert_eq!(set.elapsed_ms, 5_000);
        assert_eq!(set.status, TimerStatus::Paused);
        assert!(set.start_time.is_none());

        set.apply(SetAction::Start, 6_000).unwrap();
        assert_eq!(set.elapsed_ms, 5_000);
        set.apply(SetAction::Finish, 9_000).unwrap();
        assert_eq!(set.elapsed_ms, 8_000);
        assert_eq!(set.end_time, Some(9_000));
        assert!(set.is_consistent());
    }

    #[test]
    fn test_set_finish_from_paused_keeps_elapsed() {
        let mut set = LoggedSet::pending(1);
        set.apply(SetAction::Start, 1_000).unwrap();
        set.apply(SetAction::Pause, 3_000).unwrap();
        set.apply(SetAction::Finish, 60_000).unwrap();
        assert_eq!(set.elapsed_ms, 2_000);
        assert_eq!(set.end_time, Some(60_000));
    }

    #[test]
    fn test_set_rejects_illegal_actions() {
        let mut set = LoggedSet::pending(1);
        let before = set.clone();

        for action in [SetAction::Pause, SetAction::Finish, SetAction::Reset] {
            let err = set.apply(action, 10).unwrap_err();
            assert_eq!(
                err,
                SessionError::InvalidTransition {
                    action,
                    status: TimerStatus::Pending
                }
            );
        }
        assert_eq!(set, before);

        set.apply(SetAction::Start, 0).unwrap();
        assert!(set.apply(SetAction::Start, 1).is_err());
        assert!(set.apply(SetAction::Reset, 1).is_err());

        set.apply(SetAction::Finish, 2).unwrap();
        assert!(set.apply(SetAction::Start, 3).is_err());
        assert!(set.apply(SetAction::Finish, 3).is_err());
        assert!(set.apply(SetAction::Pause, 3).is_err());
    }

    #[test]
    fn test_set_reset_clears_everything() {
        let mut set = LoggedSet::pending(1);
        set.apply(SetAction::Start, 0).unwrap();
        set.apply(SetAction::Finish, 4_000).unwrap();
        set.apply(SetAction::Reset, 5_000).unwrap();

        assert_eq!(set.status, TimerStatus::Pending);
        assert_eq!(set.elapsed_ms, 0);
        assert!(set.start_time.is_none());
        assert!(set.end_time.is_none());
    }

    #[test]
    fn test_set_reset_pending_with_elapsed() {
        let mut set = LoggedSet::pending(1);
        set.elapsed_ms = 300;
        assert!(set.admits(SetAction::Reset));
        set.apply(SetAction::Reset, 0).unwrap();
        assert_eq!(set.elapsed_ms, 0);
    }

    #[test]
    fn test_live_elapsed_is_projection() {
        let mut set = LoggedSet::pending(1);
        set.apply(SetAction::Start, 1_000).unwrap();
        assert_eq!(set.live_elapsed_ms(4_500), 3_500);
        assert_eq!(set.elapsed_ms, 0);

        set.apply(SetAction::Pause, 2_000).unwrap();
        assert_eq!(set.live_elapsed_ms(99_000), 1_000);
    }

    #[test]
    fn test_clock_skew_never_decreases_elapsed() {
        let mut set = LoggedSet::pending(1);
        set.apply(SetAction::Start, 10_000).unwrap();
        set.apply(SetAction::Pause, 9_000).unwrap();
        assert_eq!(set.elapsed_ms, 0);
    }

    #[test]
    fn test_from_exercise_creates_target_sets() {
        let ex = exercise(3);
        assert_eq!(ex.sets.len(), 3);
        assert_eq!(
            ex.sets.iter().map(|s| s.set_number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(ex.status, TimerStatus::Pending);
    }

    #[test]
    fn test_mark_started_only_once() {
        let mut ex = exercise(2);
        assert!(ex.mark_started(100));
        assert!(!ex.mark_started(200));
        assert_eq!(ex.start_time, Some(100));
    }

    #[test]
    fn test_reconcile_prefers_span() {
        let mut ex = exercise(2);
        ex.mark_started(1_000);
        for (i, set) in ex.sets.iter_mut().enumerate() {
            let base = 1_000 + i as i64 * 10_000;
            set.apply(SetAction::Start, base).unwrap();
            set.apply(SetAction::Finish, base + 3_000).unwrap();
        }

        assert!(ex.reconcile_completion());
        assert_eq!(ex.status, TimerStatus::Completed);
        assert_eq!(ex.active_work_ms, Some(6_000));
        assert_eq!(ex.elapsed_ms, 14_000 - 1_000);
        assert!(!ex.reconcile_completion());
    }

    #[test]
    fn test_reconcile_falls_back_to_summed_time() {
        let mut ex = exercise(1);
        ex.status = TimerStatus::Active;
        ex.sets[0].status = TimerStatus::Completed;
        ex.sets[0].elapsed_ms = 2_500;
        ex.sets[0].end_time = None;

        assert!(ex.reconcile_completion());
        assert_eq!(ex.elapsed_ms, 2_500);
    }

    #[test]
    fn test_reconcile_requires_active_exercise() {
        let mut ex = exercise(1);
        ex.sets[0].status = TimerStatus::Completed;
        ex.sets[0].end_time = Some(10);
        assert!(!ex.reconcile_completion());
        assert_eq!(ex.status, TimerStatus::Pending);
    }
}
