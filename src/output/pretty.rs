use colored::{ColoredString, Colorize};

use crate::config::WeightUnit;
use crate::core::datetime::{date_time_label, time_label};
use crate::session::display::{render_progress_bar, SetView};
use crate::session::{
    format_clock, format_duration, ActiveWorkoutState, LogAck, LogValue, LogWorkoutRequest,
    SetTransition, TimerStatus, WorkoutRoutine, WorkoutSplit, WorkoutView,
};
use crate::storage::LogSummary;

fn status_icon(status: TimerStatus) -> ColoredString {
    match status {
        TimerStatus::Pending => status.icon().white(),
        TimerStatus::Active => status.icon().green().bold(),
        TimerStatus::Paused => status.icon().yellow(),
        TimerStatus::Completed => status.icon().green(),
    }
}

fn value_or_dash(value: &LogValue) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

fn weight_label(kg: Option<f64>, unit: WeightUnit) -> Option<String> {
    kg.map(|w| format!("{w} {}", unit.label()))
}

/// Format a routine as a numbered list of exercises.
pub fn format_plan_pretty(
    routine: &WorkoutRoutine,
    split: WorkoutSplit,
    unit: WeightUnit,
) -> String {
    let mut output = format!(
        "{} {} ({} exercises)\n",
        split.display_name().bold(),
        routine.date.dimmed(),
        routine.len()
    );
    output.push_str(&"─".repeat(60));
    output.push('\n');

    if let Some(insight) = &routine.ai_insight {
        output.push_str(&format!("{}\n\n", insight.italic()));
    }

    for (i, ex) in routine.routine.iter().enumerate() {
        let mut line = format!(
            "{:>2}. {}  {} x {}",
            i + 1,
            ex.name.bold(),
            ex.target_sets,
            ex.target_reps
        );
        if let Some(weight) = weight_label(ex.target_weight_kg, unit) {
            line.push_str(&format!(" @ {}", weight.yellow()));
        }
        if let Some(rest) = ex.rest_period_seconds {
            line.push_str(&format!("  {}", format!("rest {rest}s").dimmed()));
        }
        output.push_str(&line);
        output.push('\n');

        if let Some(groups) = &ex.focus_groups {
            output.push_str(&format!("    {}\n", groups.join(", ").cyan()));
        }
        if let Some(tip) = &ex.tip {
            output.push_str(&format!("    {}\n", tip.dimmed()));
        }
    }

    output
}

fn format_set_line(set: &SetView, unit: WeightUnit) -> String {
    let clock = format_clock(set.elapsed_ms);
    let clock = match set.status {
        TimerStatus::Active => clock.green().bold(),
        TimerStatus::Paused => clock.yellow(),
        _ => clock.normal(),
    };

    let weight = if set.weight_kg.is_empty() {
        "-".to_string()
    } else {
        format!("{} {}", set.weight_kg, unit.label())
    };

    format!(
        "  {} Set {}  {}  {}  x {}  RPE {}",
        status_icon(set.status),
        set.set_number,
        clock,
        weight,
        value_or_dash(&set.reps),
        value_or_dash(&set.rpe)
    )
}

/// Format the live view of a workout.
pub fn format_view_pretty(view: &WorkoutView, unit: WeightUnit) -> String {
    let mut output = Vec::new();

    let state = if view.is_paused {
        "paused".yellow().bold()
    } else {
        "in progress".green()
    };
    output.push(format!("{} workout {}", view.split.bold(), state));
    output.push(format!(
        "Elapsed {}  Active {}",
        format_clock(view.elapsed_ms),
        format_clock(view.active_ms)
    ));
    output.push("─".repeat(60));

    let Some(ex) = &view.exercise else {
        output.push("No exercise in view".dimmed().to_string());
        return output.join("\n");
    };

    output.push(format!(
        "{} Exercise {}/{}: {}",
        status_icon(ex.status),
        ex.index + 1,
        view.exercise_count,
        ex.name.bold()
    ));

    let mut target = format!("   Target: {} x {}", ex.sets.len(), ex.target_reps);
    if let Some(weight) = weight_label(ex.target_weight_kg, unit) {
        target.push_str(&format!(" @ {weight}"));
    }
    if let Some(rest) = ex.rest_period_seconds {
        target.push_str(&format!(", rest {rest}s"));
    }
    output.push(target);

    if let Some(tip) = &ex.tip {
        output.push(format!("   {}", tip.dimmed()));
    }

    output.push(format!(
        "   {} {}/{} sets",
        render_progress_bar(ex.completed_sets, ex.sets.len(), 20),
        ex.completed_sets,
        ex.sets.len()
    ));
    output.push(String::new());

    for set in &ex.sets {
        output.push(format_set_line(set, unit));
    }

    output.join("\n")
}

/// Format the outcome of a set action.
pub fn format_transition_pretty(
    transition: &SetTransition,
    exercise: &str,
    set_number: u32,
) -> String {
    let verb = match transition.to {
        TimerStatus::Active => "started".green(),
        TimerStatus::Paused => "paused".yellow(),
        TimerStatus::Completed => "finished".green(),
        TimerStatus::Pending => "reset".normal(),
    };

    let mut line = format!(
        "{} {} set {} {}",
        status_icon(transition.to),
        exercise.bold(),
        set_number,
        verb
    );
    if transition.exercise_completed {
        line.push_str(&format!("\n{}", format!("✓ {exercise} complete").green()));
    }
    line
}

/// Format a freshly started workout.
pub fn format_started_pretty(state: &ActiveWorkoutState) -> String {
    let mut output = Vec::new();
    output.push(
        format!(
            "▶ {} workout started at {}",
            state.split.display_name(),
            time_label(state.start_time)
        )
        .green()
        .to_string(),
    );
    output.push(format!("   {} exercises", state.exercise_count()));
    if let Some(first) = state.logged_data.first() {
        output.push(format!("   First up: {}", first.name.bold()));
    }
    output.push(String::new());
    output.push("   Use 'spotter set start 1' to time your first set".dimmed().to_string());
    output.push("   Use 'spotter status' to see where you are".dimmed().to_string());
    output.join("\n")
}

/// Format the acknowledgment of a saved workout.
pub fn format_finished_pretty(ack: &LogAck) -> String {
    let id = &ack.logged_workout_id;
    format!(
        "{}\n   {}",
        format!("✓ {}", ack.message).green(),
        format!("Log #{id}. See it with 'spotter history --id {id}'").dimmed()
    )
}

/// Format a list of finished workouts.
pub fn format_history_pretty(logs: &[LogSummary], unit: WeightUnit) -> String {
    if logs.is_empty() {
        return "Workout history (0 workouts)\n  No workouts logged yet".to_string();
    }

    let mut output = format!("Workout history ({} workouts)\n", logs.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for log in logs {
        output.push_str(&format!(
            "{:>4}  {}  {:<10} {:>8}  {} ex, {} sets",
            format!("#{}", log.id).dimmed(),
            date_time_label(log.started_at),
            log.split.display_name().bold(),
            format_duration(log.duration_seconds * 1_000),
            log.exercise_count,
            log.set_count
        ));
        if log.total_volume > 0.0 {
            let volume = format!("{:.0} {}", log.total_volume, unit.label());
            output.push_str(&format!("  {}", volume.cyan()));
        }
        output.push('\n');
    }

    output
}

/// Format one logged workout in full.
pub fn format_log_pretty(id: i64, log: &LogWorkoutRequest, unit: WeightUnit) -> String {
    let mut output = format!(
        "{} {} workout #{}\n",
        date_time_label(log.start_time),
        log.split.display_name().bold(),
        id
    );
    output.push_str(&format!(
        "Duration {}  Sets {}  Volume {:.0} {}\n",
        format_duration(log.total_duration_seconds * 1_000),
        log.set_count(),
        log.total_volume(),
        unit.label()
    ));
    if let Some(notes) = &log.notes {
        output.push_str(&format!("{}\n", notes.italic()));
    }
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for ex in &log.logged_exercises {
        output.push_str(&format!("{}\n", ex.name.bold()));
        for set in &ex.sets {
            let weight = set
                .weight_kg
                .map_or_else(|| "-".to_string(), |w| format!("{w} {}", unit.label()));
            let reps = set.reps.map_or_else(|| "-".to_string(), |r| r.to_string());
            let mut line = format!(
                "  Set {}  {}  x {}  {}",
                set.set_number,
                weight,
                reps,
                format_clock(set.elapsed_ms).dimmed()
            );
            if let Some(rpe) = set.rpe {
                line.push_str(&format!("  RPE {rpe}"));
            }
            output.push_str(&line);
            output.push('\n');
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Exercise, LogField, SetAction};

    fn routine() -> WorkoutRoutine {
        WorkoutRoutine {
            id: "push-2026-10-14".to_string(),
            date: "2026-10-14".to_string(),
            ai_insight: Some("Press day".to_string()),
            routine: vec![
                Exercise::new("bench", "Bench Press", 3, "8-10")
                    .with_rest(90)
                    .with_tip("Feet planted"),
                Exercise::new("dips", "Dips", 2, "12"),
            ],
        }
    }

    #[test]
    fn test_plan_lists_exercises() {
        colored::control::set_override(false);
        let out = format_plan_pretty(&routine(), WorkoutSplit::Push, WeightUnit::Kg);

        assert!(out.contains("Push 2026-10-14 (2 exercises)"));
        assert!(out.contains(" 1. Bench Press  3 x 8-10"));
        assert!(out.contains("rest 90s"));
        assert!(out.contains("Feet planted"));
        assert!(out.contains(" 2. Dips  2 x 12"));
    }

    #[test]
    fn test_view_shows_live_sets() {
        colored::control::set_override(false);
        let mut state = ActiveWorkoutState::start(routine(), WorkoutSplit::Push, 0).unwrap();
        state.start_set(0, 0, 0).unwrap();
        state
            .update_log(0, 0, LogField::Weight, LogValue::from_input("60"))
            .unwrap();

        let view = WorkoutView::project(&state, 65_000);
        let out = format_view_pretty(&view, WeightUnit::Kg);

        assert!(out.contains("Exercise 1/2: Bench Press"));
        assert!(out.contains("Set 1  01:05  60 kg  x -"));
        assert!(out.contains("Set 2  00:00  -"));
        assert!(out.contains("0/3 sets"));
    }

    #[test]
    fn test_transition_reports_exercise_completion() {
        colored::control::set_override(false);
        let transition = SetTransition {
            action: SetAction::Finish,
            from: TimerStatus::Active,
            to: TimerStatus::Completed,
            exercise_started: false,
            exercise_completed: true,
        };

        let out = format_transition_pretty(&transition, "Dips", 2);
        assert!(out.contains("Dips set 2 finished"));
        assert!(out.contains("Dips complete"));
    }

    #[test]
    fn test_empty_history() {
        let out = format_history_pretty(&[], WeightUnit::Kg);
        assert!(out.contains("No workouts logged yet"));
    }
}
