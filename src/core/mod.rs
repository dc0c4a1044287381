//! Core abstractions for spotter.
//!
//! Collaborator traits and shared time helpers.

pub mod datetime;
mod traits;

pub use traits::{LogSink, PlanSource};

#[cfg(test)]
pub use traits::{MockLogSink, MockPlanSource};
