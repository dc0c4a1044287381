//! Configuration management for spotter.
//!
//! This module handles loading configuration from `~/.spotter/`.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{ColorSetting, Config, GeneralConfig, LoggingConfig, WeightUnit, WorkoutConfig};
