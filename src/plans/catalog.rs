//! Built-in routines, one per split.
//!
//! Each routine opens with mobility work and continues with the primary
//! lifts for the split.

use crate::session::{Exercise, WorkoutSplit};

/// A built-in routine before it is dated.
pub struct BuiltinRoutine {
    pub insight: &'static str,
    pub exercises: Vec<Exercise>,
}

fn stretch(id: &str, name: &str, reps: &str) -> Exercise {
    Exercise::new(id, name, 2, reps)
        .with_rest(30)
        .with_focus(&["mobility"])
}

/// The built-in routine for a split.
#[must_use]
pub fn builtin(split: WorkoutSplit) -> BuiltinRoutine {
    match split {
        WorkoutSplit::FullBody => BuiltinRoutine {
            insight: "Balanced session. Keep the compound lifts crisp \
                      and stop two reps shy of failure.",
            exercises: vec![
                stretch("worlds-greatest-stretch", "World's Greatest Stretch", "5 per side"),
                stretch("cat-cow", "Cat-Cow", "10"),
                Exercise::new("barbell-back-squat", "Barbell Back Squat", 4, "6-8")
                    .with_rest(120)
                    .with_tip("Brace before you descend and drive the floor away.")
                    .with_focus(&["quadriceps", "glutes"]),
                Exercise::new("barbell-bench-press", "Barbell Bench Press", 3, "8-10")
                    .with_rest(90)
                    .with_focus(&["chest", "triceps"]),
                Exercise::new("bent-over-row", "Bent-Over Row", 3, "8-10")
                    .with_rest(90)
                    .with_tip("Pull to the lower ribs with a flat back.")
                    .with_focus(&["lats", "middle back"]),
                Exercise::new("plank", "Plank", 3, "45s")
                    .with_rest(45)
                    .with_focus(&["abdominals"]),
            ],
        },
        WorkoutSplit::Push => BuiltinRoutine {
            insight: "Pressing day. Prioritise bar speed on the bench and control the eccentric.",
            exercises: vec![
                stretch("doorway-chest-stretch", "Doorway Chest Stretch", "30s"),
                stretch("arm-circles", "Arm Circles", "15 each way"),
                Exercise::new("barbell-bench-press", "Barbell Bench Press", 4, "6-8")
                    .with_rest(120)
                    .with_tip("Keep the shoulder blades pinned and feet planted.")
                    .with_focus(&["chest", "triceps"]),
                Exercise::new("overhead-press", "Overhead Press", 3, "8-10")
                    .with_rest(90)
                    .with_focus(&["shoulders"]),
                Exercise::new("incline-dumbbell-press", "Incline Dumbbell Press", 3, "10-12")
                    .with_rest(75)
                    .with_focus(&["chest", "shoulders"]),
                Exercise::new("triceps-dips", "Triceps Dips", 3, "10-12")
                    .with_rest(60)
                    .with_tip("Stay upright to keep the load on the triceps.")
                    .with_focus(&["triceps"]),
                Exercise::new("lateral-raise", "Lateral Raise", 3, "12-15")
                    .with_rest(45)
                    .with_focus(&["shoulders"]),
            ],
        },
        WorkoutSplit::Pull => BuiltinRoutine {
            insight: "Pulling day. Full range on every rep and a hard squeeze at the top.",
            exercises: vec![
                stretch("dead-hang", "Dead Hang", "30s"),
                stretch("thread-the-needle", "Thread the Needle", "8 per side"),
                Exercise::new("deadlift", "Deadlift", 3, "5")
                    .with_rest(150)
                    .with_tip("Take the slack out of the bar before it leaves the floor.")
                    .with_focus(&["hamstrings", "lower back"]),
                Exercise::new("pull-up", "Pull-Up", 4, "6-10")
                    .with_rest(90)
                    .with_focus(&["lats", "biceps"]),
                Exercise::new("seated-cable-row", "Seated Cable Row", 3, "10-12")
                    .with_rest(75)
                    .with_focus(&["middle back", "lats"]),
                Exercise::new("face-pull", "Face Pull", 3, "15")
                    .with_rest(45)
                    .with_focus(&["shoulders", "traps"]),
                Exercise::new("hammer-curl", "Hammer Curl", 3, "10-12")
                    .with_rest(45)
                    .with_focus(&["biceps", "forearms"]),
            ],
        },
        WorkoutSplit::Legs => BuiltinRoutine {
            insight: "Leg day. Depth before load, and rest fully between the heavy sets.",
            exercises: vec![
                stretch("hip-flexor-stretch", "Kneeling Hip Flexor Stretch", "30s per side"),
                stretch("leg-swings", "Leg Swings", "10 per side"),
                Exercise::new("barbell-back-squat", "Barbell Back Squat", 4, "5-8")
                    .with_rest(150)
                    .with_tip("Knees track over the toes at the bottom.")
                    .with_focus(&["quadriceps", "glutes"]),
                Exercise::new("romanian-deadlift", "Romanian Deadlift", 3, "8-10")
                    .with_rest(90)
                    .with_focus(&["hamstrings", "glutes"]),
                Exercise::new("walking-lunge", "Walking Lunge", 3, "10 per leg")
                    .with_rest(75)
                    .with_focus(&["quadriceps", "glutes"]),
                Exercise::new("standing-calf-raise", "Standing Calf Raise", 4, "12-15")
                    .with_rest(45)
                    .with_focus(&["calves"]),
            ],
        },
        WorkoutSplit::Abs => BuiltinRoutine {
            insight: "Core session. Short rests and slow, controlled reps.",
            exercises: vec![
                stretch("cobra-stretch", "Cobra Stretch", "30s"),
                stretch("dead-bug", "Dead Bug", "8 per side"),
                Exercise::new("hanging-leg-raise", "Hanging Leg Raise", 3, "10-12")
                    .with_rest(60)
                    .with_tip("Curl the pelvis up instead of swinging the legs.")
                    .with_focus(&["abdominals"]),
                Exercise::new("cable-crunch", "Cable Crunch", 3, "12-15")
                    .with_rest(45)
                    .with_focus(&["abdominals"]),
                Exercise::new("russian-twist", "Russian Twist", 3, "20")
                    .with_rest(45)
                    .with_focus(&["obliques"]),
                Exercise::new("side-plank", "Side Plank", 3, "30s per side")
                    .with_rest(30)
                    .with_focus(&["obliques"]),
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_split_has_a_routine() {
        for split in WorkoutSplit::ALL {
            let builtin = builtin(split);
            assert!(builtin.exercises.len() >= 4, "{split:?}");
            assert!(builtin.exercises.iter().all(|ex| ex.target_sets >= 1));
        }
    }

    #[test]
    fn test_exercise_ids_unique_within_routine() {
        for split in WorkoutSplit::ALL {
            let exercises = builtin(split).exercises;
            let mut ids: Vec<_> = exercises.iter().map(|ex| ex.id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), exercises.len(), "{split:?}");
        }
    }
}
