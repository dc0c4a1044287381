//! Application state for the TUI.

use std::time::Duration;

use crate::config::{Config, WeightUnit};
use crate::core::{LogSink, PlanSource};
use crate::error::SpotterError;
use crate::session::{tick_interval, Clock, Direction, SetAction, TimerStatus, WorkoutView};
use crate::tracker::WorkoutTracker;

/// Application state.
pub struct App<P, S, C> {
    tracker: WorkoutTracker<P, S, C>,
    /// Selected set within the exercise in view.
    pub selected: usize,
    /// Status message to display.
    pub status: Option<String>,
    /// Display unit for weights.
    pub unit: WeightUnit,
    tick_ms: u64,
}

impl<P: PlanSource, S: LogSink, C: Clock> App<P, S, C> {
    /// Create a new app over a tracker with a workout in progress.
    ///
    /// # Errors
    ///
    /// Returns `SpotterError::NoActiveWorkout` if there is nothing to show.
    pub fn new(tracker: WorkoutTracker<P, S, C>, config: &Config) -> Result<Self, SpotterError> {
        if tracker.active().is_none() {
            return Err(SpotterError::NoActiveWorkout);
        }

        let mut app = Self {
            tracker,
            selected: 0,
            status: Some("Press ? for help".to_string()),
            unit: config.workout.weight_unit,
            tick_ms: config.workout.tick_interval_ms,
        };
        app.select_default();
        Ok(app)
    }

    /// Live snapshot of the workout.
    #[must_use]
    pub fn view(&self) -> Option<WorkoutView> {
        self.tracker.view()
    }

    /// How long to wait for input before redrawing.
    ///
    /// `None` means nothing in view is running, so the screen only
    /// changes in response to input.
    #[must_use]
    pub fn poll_timeout(&self) -> Option<Duration> {
        self.tracker
            .active()
            .and_then(|state| tick_interval(state, self.tick_ms))
    }

    fn set_count(&self) -> usize {
        self.tracker
            .active()
            .and_then(|state| state.current_exercise())
            .map_or(0, |ex| ex.sets.len())
    }

    /// Select the running set, else the first unfinished one.
    fn select_default(&mut self) {
        let Some(ex) = self.tracker.active().and_then(|s| s.current_exercise()) else {
            self.selected = 0;
            return;
        };

        self.selected = ex
            .active_set_index()
            .or_else(|| {
                ex.sets
                    .iter()
                    .position(|set| set.status != TimerStatus::Completed)
            })
            .unwrap_or(0);
    }

    /// Move selection up.
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move selection down.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.set_count() {
            self.selected += 1;
        }
    }

    /// Show another exercise.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be saved.
    pub fn navigate(&mut self, direction: Direction) -> Result<(), SpotterError> {
        self.tracker.navigate(direction)?;
        self.select_default();
        self.status = None;
        Ok(())
    }

    /// Apply a timer action to the selected set.
    ///
    /// Engine rejections become the status message.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be saved.
    pub fn apply(&mut self, action: SetAction) -> Result<(), SpotterError> {
        let Some(exercise) = self.tracker.active().map(|s| s.current_exercise_index) else {
            return Err(SpotterError::NoActiveWorkout);
        };

        match self.tracker.set_action(exercise, self.selected, action) {
            Ok(transition) => {
                self.status = Some(if transition.exercise_completed {
                    "Exercise complete".to_string()
                } else {
                    format!("Set {} {}", self.selected + 1, transition.to)
                });
                Ok(())
            }
            Err(e) if e.is_notice() => {
                self.status = Some(e.to_string());
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Pause the workout, or resume it if paused.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be saved.
    pub fn toggle_workout_pause(&mut self) -> Result<(), SpotterError> {
        let paused = self.tracker.active().is_some_and(|s| s.is_paused);
        let result = if paused {
            self.tracker.resume_workout().map(|()| "Workout resumed")
        } else {
            self.tracker.pause_workout().map(|_| "Workout paused")
        };

        match result {
            Ok(message) => {
                self.status = Some(message.to_string());
                Ok(())
            }
            Err(e) if e.is_notice() => {
                self.status = Some(e.to_string());
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Clear the status message.
    pub fn clear_status(&mut self) {
        self.status = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MockLogSink, MockPlanSource};
    use crate::session::{Exercise, ManualClock, WorkoutRoutine, WorkoutSplit};
    use crate::storage::SessionCache;
    use tempfile::TempDir;

    fn create_app<'a>(
        temp_dir: &TempDir,
        clock: &'a ManualClock,
    ) -> App<MockPlanSource, MockLogSink, &'a ManualClock> {
        let cache = SessionCache::with_dir(temp_dir.path().join("cache"));
        let mut tracker =
            WorkoutTracker::new(MockPlanSource::new(), MockLogSink::new(), cache, clock);
        let routine = WorkoutRoutine {
            id: "abs-2026-10-14".to_string(),
            date: "2026-10-14".to_string(),
            ai_insight: None,
            routine: vec![
                Exercise::new("crunch", "Crunch", 2, "15"),
                Exercise::new("plank", "Plank", 3, "30s"),
            ],
        };
        tracker
            .start_with_routine(routine, WorkoutSplit::Abs)
            .unwrap();
        App::new(tracker, &Config::default()).unwrap()
    }

    #[test]
    fn test_no_workout_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let clock = ManualClock::new(0);
        let cache = SessionCache::with_dir(temp_dir.path().join("cache"));
        let tracker =
            WorkoutTracker::new(MockPlanSource::new(), MockLogSink::new(), cache, &clock);

        assert!(matches!(
            App::new(tracker, &Config::default()),
            Err(SpotterError::NoActiveWorkout)
        ));
    }

    #[test]
    fn test_selection_is_bounded() {
        let temp_dir = TempDir::new().unwrap();
        let clock = ManualClock::new(0);
        let mut app = create_app(&temp_dir, &clock);

        app.select_previous();
        assert_eq!(app.selected, 0);
        app.select_next();
        app.select_next();
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_tick_only_while_running() {
        let temp_dir = TempDir::new().unwrap();
        let clock = ManualClock::new(0);
        let mut app = create_app(&temp_dir, &clock);
        assert!(app.poll_timeout().is_none());

        app.apply(SetAction::Start).unwrap();
        assert_eq!(app.poll_timeout(), Some(Duration::from_millis(1_000)));

        app.apply(SetAction::Pause).unwrap();
        assert!(app.poll_timeout().is_none());
    }

    #[test]
    fn test_rejection_becomes_status() {
        let temp_dir = TempDir::new().unwrap();
        let clock = ManualClock::new(0);
        let mut app = create_app(&temp_dir, &clock);

        app.apply(SetAction::Start).unwrap();
        app.select_next();
        app.apply(SetAction::Start).unwrap();

        let status = app.status.clone().unwrap();
        assert!(status.contains("already active"), "{status}");
    }

    #[test]
    fn test_navigate_selects_first_unfinished_set() {
        let temp_dir = TempDir::new().unwrap();
        let clock = ManualClock::new(0);
        let mut app = create_app(&temp_dir, &clock);

        app.apply(SetAction::Start).unwrap();
        clock.advance(1_000);
        app.apply(SetAction::Finish).unwrap();

        app.navigate(Direction::Next).unwrap();
        assert_eq!(app.selected, 0);
        app.navigate(Direction::Prev).unwrap();
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_toggle_workout_pause() {
        let temp_dir = TempDir::new().unwrap();
        let clock = ManualClock::new(0);
        let mut app = create_app(&temp_dir, &clock);

        app.toggle_workout_pause().unwrap();
        assert_eq!(app.status.as_deref(), Some("Workout paused"));
        assert!(app.view().unwrap().is_paused);

        app.toggle_workout_pause().unwrap();
        assert_eq!(app.status.as_deref(), Some("Workout resumed"));
        assert!(!app.view().unwrap().is_paused);
    }
}
