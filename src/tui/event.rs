//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::SpotterError;

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start the selected set.
    Start,
    /// Pause the selected set.
    Pause,
    /// Finish the selected set.
    Finish,
    /// Reset the selected set.
    Reset,
    /// Show the next exercise.
    NextExercise,
    /// Show the previous exercise.
    PrevExercise,
    /// Select the next set.
    SelectNext,
    /// Select the previous set.
    SelectPrevious,
    /// Pause or resume the whole workout.
    ToggleWorkout,
    /// Show key help.
    Help,
    /// Any other key.
    Dismiss,
}

/// Key help shown in the status bar.
pub const HELP: &str =
    "h/l:exercise | j/k:set | s:start | p:pause | f:finish | r:reset | P:pause workout | q:quit";

/// Map a key press to an action.
#[must_use]
pub fn action_for(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('s') => Action::Start,
        KeyCode::Char('p') => Action::Pause,
        KeyCode::Char('f') => Action::Finish,
        KeyCode::Char('r') => Action::Reset,
        KeyCode::Char('P') => Action::ToggleWorkout,
        KeyCode::Char('l') | KeyCode::Right => Action::NextExercise,
        KeyCode::Char('h') | KeyCode::Left => Action::PrevExercise,
        KeyCode::Char('j') | KeyCode::Down => Action::SelectNext,
        KeyCode::Char('k') | KeyCode::Up => Action::SelectPrevious,
        KeyCode::Char('?') => Action::Help,
        _ => Action::Dismiss,
    }
}

/// Wait for the next key press.
///
/// With a timeout, returns `None` when it elapses so the caller can redraw.
/// Without one, blocks until a key arrives.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn next_action(timeout: Option<Duration>) -> Result<Option<Action>, SpotterError> {
    if let Some(timeout) = timeout {
        if !event::poll(timeout)
            .map_err(|e| SpotterError::Config(format!("Event poll failed: {e}")))?
        {
            return Ok(None);
        }
    }

    let event =
        event::read().map_err(|e| SpotterError::Config(format!("Event read failed: {e}")))?;

    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(action_for(key))),
        _ => Ok(None),
    }
}
