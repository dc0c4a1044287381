//! Storage layer for spotter.
//!
//! - `SQLite` history of finished workouts
//! - JSON file cache for the live session and the last fetched plan

mod cache;
mod database;
mod log_store;
mod migrations;

pub use cache::{CachedPlan, SessionCache, ACTIVE_SESSION_KEY, LAST_PLAN_KEY};
pub use database::Database;
pub use log_store::{LogStore, LogSummary};
