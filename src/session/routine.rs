//! Workout plans: splits, prescribed exercises and routines.
//!
//! Routines are produced by a [`PlanSource`](crate::core::PlanSource) and
//! never mutated once a session has been started from them.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Category of workout focus used to select a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkoutSplit {
    /// Whole-body session
    FullBody,
    /// Chest, shoulders, triceps
    #[default]
    Push,
    /// Back and biceps
    Pull,
    /// Lower body
    Legs,
    /// Core work
    Abs,
}

impl WorkoutSplit {
    /// All splits in menu order.
    pub const ALL: [Self; 5] = [Self::FullBody, Self::Push, Self::Pull, Self::Legs, Self::Abs];

    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::FullBody => "Full Body",
            Self::Push => "Push",
            Self::Pull => "Pull",
            Self::Legs => "Legs",
            Self::Abs => "Abs",
        }
    }

    /// Lowercase slug, used for file names and routine identifiers.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::FullBody => "full_body",
            Self::Push => "push",
            Self::Pull => "pull",
            Self::Legs => "legs",
            Self::Abs => "abs",
        }
    }

    /// Parse split from a loose string (`push`, `FULL_BODY`, `full-body`, `fb`).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "full_body" | "fullbody" | "full" | "fb" => Some(Self::FullBody),
            "push" => Some(Self::Push),
            "pull" => Some(Self::Pull),
            "legs" | "leg" => Some(Self::Legs),
            "abs" | "core" => Some(Self::Abs),
            _ => None,
        }
    }
}

impl std::fmt::Display for WorkoutSplit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A prescribed unit of work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub target_sets: u32,
    /// Free-form, e.g. `"8-10"` or `"15"`
    pub target_reps: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_period_seconds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_groups: Option<Vec<String>>,
}

impl Exercise {
    /// Create an exercise with only the required targets.
    #[must_use]
    pub fn new(id: &str, name: &str, target_sets: u32, target_reps: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            target_sets,
            target_reps: target_reps.to_string(),
            target_weight_kg: None,
            rest_period_seconds: None,
            tip: None,
            focus_groups: None,
        }
    }

    /// Set the prescribed rest period.
    #[must_use]
    pub const fn with_rest(mut self, seconds: u32) -> Self {
        self.rest_period_seconds = Some(seconds);
        self
    }

    /// Attach a coaching tip.
    #[must_use]
    pub fn with_tip(mut self, tip: &str) -> Self {
        self.tip = Some(tip.to_string());
        self
    }

    /// Attach focus-group tags.
    #[must_use]
    pub fn with_focus(mut self, groups: &[&str]) -> Self {
        self.focus_groups = Some(groups.iter().map(|g| (*g).to_string()).collect());
        self
    }
}

/// The plan for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRoutine {
    pub id: String,
    /// Date label, `YYYY-MM-DD`
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_insight: Option<String>,
    pub routine: Vec<Exercise>,
}

impl WorkoutRoutine {
    /// Number of prescribed exercises.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routine.len()
    }

    /// Whether the routine prescribes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routine.is_empty()
    }

    /// Check that a session can be built from this routine.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidRoutine` if the routine has no exercises
    /// or an exercise prescribes zero sets.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.routine.is_empty() {
            return Err(SessionError::InvalidRoutine(format!(
                "routine '{}' has no exercises",
                self.id
            )));
        }
        if let Some(ex) = self.routine.iter().find(|ex| ex.target_sets == 0) {
            return Err(SessionError::InvalidRoutine(format!(
                "exercise '{}' has no target sets",
                ex.name
            )));
        }
        Ok(())
    }
}
