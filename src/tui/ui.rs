//! UI rendering for the TUI.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::config::WeightUnit;
use crate::session::display::{ExerciseView, SetView};
use crate::session::{format_clock, TimerStatus, WorkoutView};
use crate::tui::event::HELP;

const fn status_color(status: TimerStatus) -> Color {
    match status {
        TimerStatus::Pending => Color::White,
        TimerStatus::Active => Color::Green,
        TimerStatus::Paused => Color::Yellow,
        TimerStatus::Completed => Color::DarkGray,
    }
}

/// Render the workout screen.
pub fn render(
    frame: &mut Frame<'_>,
    view: &WorkoutView,
    selected: usize,
    status: Option<&str>,
    unit: WeightUnit,
) {
    // Header, exercise, progress, sets, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, view, chunks[0]);
    if let Some(ex) = &view.exercise {
        render_exercise(frame, view, ex, unit, chunks[1]);
        render_progress(frame, ex, chunks[2]);
        render_sets(frame, ex, selected, unit, chunks[3]);
    }
    render_status_bar(frame, status, chunks[4]);
}

fn render_header(frame: &mut Frame<'_>, view: &WorkoutView, area: Rect) {
    let mut spans = vec![
        Span::styled(
            format!(" {} workout ", view.split),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " Elapsed {}  Active {} ",
            format_clock(view.elapsed_ms),
            format_clock(view.active_ms)
        )),
    ];
    if view.is_paused {
        spans.push(Span::styled(
            " PAUSED ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(header, area);
}

fn render_exercise(
    frame: &mut Frame<'_>,
    view: &WorkoutView,
    ex: &ExerciseView,
    unit: WeightUnit,
    area: Rect,
) {
    let mut target = format!("{} x {}", ex.sets.len(), ex.target_reps);
    if let Some(weight) = ex.target_weight_kg {
        target.push_str(&format!(" @ {weight} {}", unit.label()));
    }
    if let Some(rest) = ex.rest_period_seconds {
        target.push_str(&format!("  rest {rest}s"));
    }

    let mut lines = vec![Line::from(target)];
    if let Some(tip) = &ex.tip {
        lines.push(Line::from(Span::styled(
            tip.clone(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let title = format!(
        " {} {}/{}: {} ",
        ex.status.icon(),
        ex.index + 1,
        view.exercise_count,
        ex.name
    );
    let panel = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(Span::styled(
                title,
                Style::default()
                    .fg(status_color(ex.status))
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL),
    );

    frame.render_widget(panel, area);
}

fn render_progress(frame: &mut Frame<'_>, ex: &ExerciseView, area: Rect) {
    let total = ex.sets.len().max(1);
    #[allow(clippy::cast_precision_loss)]
    let ratio = ex.completed_sets as f64 / total as f64;

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("{}/{} sets", ex.completed_sets, ex.sets.len()));

    frame.render_widget(gauge, area);
}

fn set_line(set: &SetView, unit: WeightUnit) -> Line<'static> {
    let field = |value: String| if value.is_empty() { "-".to_string() } else { value };

    Line::from(vec![
        Span::styled(
            format!("{} ", set.status.icon()),
            Style::default().fg(status_color(set.status)),
        ),
        Span::raw(format!("Set {:<3}", set.set_number)),
        Span::styled(
            format!("{:>8}  ", format_clock(set.elapsed_ms)),
            Style::default()
                .fg(status_color(set.status))
                .add_modifier(if set.status == TimerStatus::Active {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                }),
        ),
        Span::raw(format!(
            "{} {}  x {}  RPE {}",
            field(set.weight_kg.to_string()),
            unit.label(),
            field(set.reps.to_string()),
            field(set.rpe.to_string())
        )),
    ])
}

fn render_sets(
    frame: &mut Frame<'_>,
    ex: &ExerciseView,
    selected: usize,
    unit: WeightUnit,
    area: Rect,
) {
    let items: Vec<ListItem<'_>> = ex
        .sets
        .iter()
        .map(|set| ListItem::new(set_line(set, unit)))
        .collect();

    let list = List::new(items)
        .block(Block::default().title(" Sets ").borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    state.select(Some(selected));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_status_bar(frame: &mut Frame<'_>, status: Option<&str>, area: Rect) {
    let status =
        Paragraph::new(status.unwrap_or(HELP)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(status, area);
}
