//! spotter - A workout session tracker for the terminal
//!
//! This crate provides the workout session engine (set timers, pause-aware
//! elapsed time, logged reps and weights), local plan and history storage,
//! and the command-line and terminal interfaces built on top of it.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod output;
pub mod plans;
pub mod session;
pub mod storage;
pub mod tracker;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::{SessionError, SpotterError};
pub use tracker::WorkoutTracker;
