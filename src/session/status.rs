//! Timer status shared by logged sets and logged exercises.

use serde::{Deserialize, Serialize};

/// Status of a set or exercise timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    /// Not started yet
    #[default]
    Pending,
    /// Timer is running
    Active,
    /// Timer is stopped but can be resumed
    Paused,
    /// Terminal state
    Completed,
}

impl TimerStatus {
    /// Get the lowercase label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Completed => "completed",
        }
    }

    /// Short glyph used in listings.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Pending => "○",
            Self::Active => "▶",
            Self::Paused => "⏸",
            Self::Completed => "✓",
        }
    }
}

impl std::fmt::Display for TimerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
