//! The workout tracker: every user action on a workout goes through here.
//!
//! The tracker owns the optional live session and wires it to a plan source,
//! a log sink, the session cache and a clock. Each accepted mutation is
//! written to the cache before the call returns, so a crashed or closed
//! front end resumes where it left off.

use tracing::{debug, info, warn};

use crate::core::{LogSink, PlanSource};
use crate::error::{SessionError, SpotterError};
use crate::session::{
    ActiveWorkoutState, Clock, Direction, LogAck, LogField, LogValue, LogWorkoutRequest, Millis,
    SetAction, SetTransition, WorkoutRoutine, WorkoutSplit, WorkoutView,
};
use crate::storage::SessionCache;

/// Coordinates the session engine with its collaborators.
pub struct WorkoutTracker<P, S, C> {
    plans: P,
    sink: S,
    cache: SessionCache,
    clock: C,
    active: Option<ActiveWorkoutState>,
}

impl<P: PlanSource, S: LogSink, C: Clock> WorkoutTracker<P, S, C> {
    /// Create a tracker, restoring a cached session if there is a valid one.
    pub fn new(plans: P, sink: S, cache: SessionCache, clock: C) -> Self {
        let active = cache.load_active_session();
        if let Some(state) = &active {
            debug!(workout = %state.workout_id, "Restored workout session");
        }

        Self {
            plans,
            sink,
            cache,
            clock,
            active,
        }
    }

    /// The live session, if any.
    #[must_use]
    pub const fn active(&self) -> Option<&ActiveWorkoutState> {
        self.active.as_ref()
    }

    /// Current time according to the tracker's clock.
    #[must_use]
    pub fn now(&self) -> Millis {
        self.clock.now_ms()
    }

    /// Live projection of the session for display.
    #[must_use]
    pub fn view(&self) -> Option<WorkoutView> {
        self.active
            .as_ref()
            .map(|state| WorkoutView::project(state, self.clock.now_ms()))
    }

    fn session(&self) -> Result<&ActiveWorkoutState, SpotterError> {
        self.active.as_ref().ok_or(SpotterError::NoActiveWorkout)
    }

    /// Apply `change` to a copy of the session and adopt it once cached.
    ///
    /// On a rejection or a failed write the live session is left as it was.
    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut ActiveWorkoutState) -> Result<T, SessionError>,
    ) -> Result<T, SpotterError> {
        let mut next = self.session()?.clone();
        let outcome = change(&mut next)?;
        self.cache.save_active_session(&next)?;
        self.active = Some(next);
        Ok(outcome)
    }

    /// The plan for `split`, reusing the cached one when it matches.
    ///
    /// # Errors
    ///
    /// Returns an error if a fetch is needed and fails.
    pub fn current_plan(&self, split: WorkoutSplit) -> Result<WorkoutRoutine, SpotterError> {
        if let Some(cached) = self.cache.load_last_plan() {
            if cached.split == split {
                debug!(routine = %cached.routine.id, "Using cached plan");
                return Ok(cached.routine);
            }
        }
        self.regenerate_plan(split)
    }

    /// Fetch a fresh plan for `split` and remember it.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails; the cached plan is then untouched.
    pub fn regenerate_plan(&self, split: WorkoutSplit) -> Result<WorkoutRoutine, SpotterError> {
        let routine = self.plans.fetch_plan(split)?;
        self.cache.save_last_plan(split, &routine)?;
        info!(routine = %routine.id, %split, "Fetched workout plan");
        Ok(routine)
    }

    /// Start a workout from the current plan for `split`.
    ///
    /// # Errors
    ///
    /// - `SpotterError::WorkoutInProgress` if a session is live
    /// - Any error from fetching the plan or validating the routine
    pub fn start_workout(
        &mut self,
        split: WorkoutSplit,
    ) -> Result<&ActiveWorkoutState, SpotterError> {
        if self.active.is_some() {
            return Err(SpotterError::WorkoutInProgress);
        }
        let routine = self.current_plan(split)?;
        self.start_with_routine(routine, split)
    }

    /// Start a workout from an explicit routine.
    ///
    /// # Errors
    ///
    /// - `SpotterError::WorkoutInProgress` if a session is live
    /// - `SessionError::InvalidRoutine` if the routine cannot be run
    pub fn start_with_routine(
        &mut self,
        routine: WorkoutRoutine,
        split: WorkoutSplit,
    ) -> Result<&ActiveWorkoutState, SpotterError> {
        if self.active.is_some() {
            return Err(SpotterError::WorkoutInProgress);
        }

        let state = ActiveWorkoutState::start(routine, split, self.clock.now_ms())?;
        info!(workout = %state.workout_id, exercises = state.exercise_count(), "Workout started");
        self.cache.save_active_session(&state)?;
        Ok(self.active.insert(state))
    }

    /// Apply a timer action to one set.
    ///
    /// # Errors
    ///
    /// Returns `SpotterError::NoActiveWorkout`, `SpotterError::Session`
    /// when the engine rejects the action, or a cache write error. None of
    /// these change the session.
    pub fn set_action(
        &mut self,
        exercise: usize,
        set: usize,
        action: SetAction,
    ) -> Result<SetTransition, SpotterError> {
        let now = self.clock.now_ms();
        self.commit(|state| state.apply_set_action(exercise, set, action, now))
    }

    /// Move the view to another exercise.
    ///
    /// # Errors
    ///
    /// Returns `SpotterError::NoActiveWorkout` if there is no session.
    pub fn navigate(&mut self, direction: Direction) -> Result<usize, SpotterError> {
        self.commit(|state| Ok(state.navigate(direction)))
    }

    /// Record weight, reps or RPE for a set.
    ///
    /// # Errors
    ///
    /// Returns `SpotterError::NoActiveWorkout`, or `SpotterError::Session`
    /// if the set does not exist.
    pub fn update_log(
        &mut self,
        exercise: usize,
        set: usize,
        field: LogField,
        value: LogValue,
    ) -> Result<(), SpotterError> {
        self.commit(|state| state.update_log(exercise, set, field, value))
    }

    /// Pause the whole workout.
    ///
    /// # Errors
    ///
    /// Returns `SpotterError::NoActiveWorkout`, or `SpotterError::Session`
    /// if the workout is already paused.
    pub fn pause_workout(&mut self) -> Result<Option<SetTransition>, SpotterError> {
        let now = self.clock.now_ms();
        self.commit(|state| state.pause_workout(now))
    }

    /// Resume a paused workout.
    ///
    /// # Errors
    ///
    /// Returns `SpotterError::NoActiveWorkout`, or `SpotterError::Session`
    /// if the workout is not paused.
    pub fn resume_workout(&mut self) -> Result<(), SpotterError> {
        let now = self.clock.now_ms();
        self.commit(|state| state.resume_workout(now))
    }

    /// Submit the workout and end the session.
    ///
    /// # Errors
    ///
    /// Returns `SpotterError::NoActiveWorkout`, or the sink's error. On a
    /// failed submission the session stays live and cached. Once the sink
    /// has accepted the log the session is over, even if the cache entry
    /// cannot be removed.
    pub fn finish_workout(&mut self, notes: Option<String>) -> Result<LogAck, SpotterError> {
        let now = self.clock.now_ms();
        let payload = LogWorkoutRequest::from_session(self.session()?, now, notes);

        let ack = self
            .sink
            .submit_log(&payload)
            .inspect_err(|e| warn!(error = %e, "Workout submission failed, session kept"))?;

        self.active = None;
        if let Err(e) = self.cache.clear_active_session() {
            warn!(error = %e, "Failed to clear finished workout from cache");
        }
        info!(
            log_id = %ack.logged_workout_id,
            sets = payload.set_count(),
            "Workout finished"
        );
        Ok(ack)
    }

    /// Discard the session without submitting it.
    ///
    /// # Errors
    ///
    /// Returns `SpotterError::NoActiveWorkout` if there is no session.
    pub fn cancel_workout(&mut self) -> Result<ActiveWorkoutState, SpotterError> {
        if self.active.is_none() {
            return Err(SpotterError::NoActiveWorkout);
        }
        self.cache.clear_active_session()?;
        let state = self.active.take().ok_or(SpotterError::NoActiveWorkout)?;
        info!(workout = %state.workout_id, "Workout cancelled");
        Ok(state)
    }
}
