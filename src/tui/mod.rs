//! Terminal User Interface (TUI) for spotter.
//!
//! A live workout screen built with ratatui and crossterm. The screen
//! redraws on a tick only while a set in view is running; otherwise it
//! waits for input.

mod app;
mod event;
mod ui;

pub use app::App;

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::config::Config;
use crate::core::{LogSink, PlanSource};
use crate::error::SpotterError;
use crate::session::{Clock, Direction, SetAction};
use crate::tracker::WorkoutTracker;

use event::Action;

/// Run the TUI over a tracker with a workout in progress.
///
/// # Errors
///
/// Returns an error if there is no workout, or the TUI fails to initialize or run.
pub fn run<P: PlanSource, S: LogSink, C: Clock>(
    tracker: WorkoutTracker<P, S, C>,
    config: &Config,
) -> Result<(), SpotterError> {
    let mut app = App::new(tracker, config)?;

    enable_raw_mode()
        .map_err(|e| SpotterError::Config(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| SpotterError::Config(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| SpotterError::Config(format!("Failed to create terminal: {e}")))?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main application loop.
fn run_app<B: Backend, P: PlanSource, S: LogSink, C: Clock>(
    terminal: &mut Terminal<B>,
    app: &mut App<P, S, C>,
) -> Result<(), SpotterError> {
    loop {
        let Some(view) = app.view() else {
            break;
        };
        terminal
            .draw(|frame| ui::render(frame, &view, app.selected, app.status.as_deref(), app.unit))
            .map_err(|e| SpotterError::Config(format!("Failed to draw: {e}")))?;

        let Some(action) = event::next_action(app.poll_timeout())? else {
            continue;
        };

        match action {
            Action::Quit => break,
            Action::Start => app.apply(SetAction::Start)?,
            Action::Pause => app.apply(SetAction::Pause)?,
            Action::Finish => app.apply(SetAction::Finish)?,
            Action::Reset => app.apply(SetAction::Reset)?,
            Action::NextExercise => app.navigate(Direction::Next)?,
            Action::PrevExercise => app.navigate(Direction::Prev)?,
            Action::SelectNext => app.select_next(),
            Action::SelectPrevious => app.select_previous(),
            Action::ToggleWorkout => app.toggle_workout_pause()?,
            Action::Help => app.status = Some(event::HELP.to_string()),
            Action::Dismiss => app.clear_status(),
        }
    }

    Ok(())
}
