//! Database migrations for spotter.
//!
//! Migrations run automatically when the database is opened. The schema
//! version lives in `PRAGMA user_version`.

use rusqlite::Connection;

use crate::error::SpotterError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 for a new database.
pub fn get_version(conn: &Connection) -> Result<i32, SpotterError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| SpotterError::Database(format!("Failed to get schema version: {e}")))
}

fn set_version(conn: &Connection, version: i32) -> Result<(), SpotterError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| SpotterError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), SpotterError> {
    let current = get_version(conn)?;

    for version in (current + 1)..=CURRENT_VERSION {
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> Result<(), SpotterError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(SpotterError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: Initial schema.
///
/// - `workout_logs`: one row per finished workout, with the full payload
/// - `logged_sets`: one row per submitted set, for history queries
fn migrate_v1(conn: &Connection) -> Result<(), SpotterError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS workout_logs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            routine_id TEXT NOT NULL,
            split TEXT NOT NULL,
            started_at INTEGER NOT NULL,
            ended_at INTEGER NOT NULL,
            duration_seconds INTEGER NOT NULL,
            notes TEXT,
            payload TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_workout_logs_started
            ON workout_logs(started_at);

        CREATE TABLE IF NOT EXISTS logged_sets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            log_id INTEGER NOT NULL REFERENCES workout_logs(id) ON DELETE CASCADE,
            exercise_id TEXT NOT NULL,
            exercise_name TEXT NOT NULL,
            set_number INTEGER NOT NULL,
            weight_kg REAL,
            reps INTEGER,
            rpe REAL,
            elapsed_ms INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_logged_sets_log
            ON logged_sets(log_id);
        ",
    )
    .map_err(|e| SpotterError::Database(format!("Migration v1 failed: {e}")))
}
