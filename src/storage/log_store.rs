//! Workout history storage.
//!
//! Finished workouts are persisted to the local database. This is the
//! shipped [`LogSink`].

use rusqlite::{params, OptionalExtension, Row};
use serde::Serialize;
use tracing::{debug, info};

use super::Database;
use crate::core::LogSink;
use crate::error::SpotterError;
use crate::session::{LogAck, LogWorkoutRequest, Millis, WorkoutSplit};

/// One row of the workout history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogSummary {
    pub id: i64,
    pub routine_id: String,
    pub split: WorkoutSplit,
    pub started_at: Millis,
    pub duration_seconds: i64,
    pub notes: Option<String>,
    pub exercise_count: i64,
    pub set_count: i64,
    pub total_volume: f64,
}

/// Storage for finished workouts.
pub struct LogStore {
    db: Database,
}

impl LogStore {
    /// Open the log store at the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn new() -> Result<Self, SpotterError> {
        Ok(Self {
            db: Database::open()?,
        })
    }

    /// Create storage with an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Persist a payload and its sets in one transaction.
    fn insert(&self, payload: &LogWorkoutRequest) -> Result<i64, SpotterError> {
        let json = serde_json::to_string(payload)?;
        let conn = self.db.connection();
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| SpotterError::Database(format!("Failed to begin transaction: {e}")))?;

        tx.execute(
            r"INSERT INTO workout_logs
              (routine_id, split, started_at, ended_at, duration_seconds, notes, payload)
              VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                payload.workout_routine_id,
                split_to_string(payload.split),
                payload.start_time,
                payload.end_time,
                payload.total_duration_seconds,
                payload.notes,
                json,
            ],
        )
        .map_err(|e| SpotterError::Database(format!("Failed to insert workout log: {e}")))?;
        let log_id = tx.last_insert_rowid();

        for exercise in &payload.logged_exercises {
            for set in &exercise.sets {
                tx.execute(
                    r"INSERT INTO logged_sets
                      (log_id, exercise_id, exercise_name, set_number,
                       weight_kg, reps, rpe, elapsed_ms)
                      VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    params![
                        log_id,
                        exercise.exercise_id,
                        exercise.name,
                        set.set_number,
                        set.weight_kg,
                        set.reps,
                        set.rpe,
                        set.elapsed_ms,
                    ],
                )
                .map_err(|e| SpotterError::Database(format!("Failed to insert set: {e}")))?;
            }
        }

        tx.commit()
            .map_err(|e| SpotterError::Database(format!("Failed to commit workout log: {e}")))?;
        debug!(log_id, sets = payload.set_count(), "Workout log stored");
        Ok(log_id)
    }

    /// Most recent workouts, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn recent(&self, limit: usize) -> Result<Vec<LogSummary>, SpotterError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(
                r"SELECT l.id, l.routine_id, l.split, l.started_at, l.duration_seconds, l.notes,
                         COUNT(DISTINCT s.exercise_id), COUNT(s.id),
                         COALESCE(SUM(s.weight_kg * s.reps), 0.0)
                  FROM workout_logs l
                  LEFT JOIN logged_sets s ON s.log_id = l.id
                  GROUP BY l.id
                  ORDER BY l.started_at DESC, l.id DESC
                  LIMIT ?1",
            )
            .map_err(|e| SpotterError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([limit], row_to_summary)
            .map_err(|e| SpotterError::Database(format!("Failed to query history: {e}")))?;

        let mut logs = Vec::new();
        for row in rows {
            logs.push(row.map_err(|e| SpotterError::Database(e.to_string()))?);
        }

        Ok(logs)
    }

    /// The stored payload of one workout.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored payload is unreadable.
    pub fn get(&self, id: i64) -> Result<Option<LogWorkoutRequest>, SpotterError> {
        let conn = self.db.connection();

        let payload: Option<String> = conn
            .query_row("SELECT payload FROM workout_logs WHERE id = ?1", [id], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| SpotterError::Database(format!("Failed to query workout log: {e}")))?;

        payload
            .map(|json| serde_json::from_str(&json).map_err(SpotterError::from))
            .transpose()
    }
}

impl LogSink for LogStore {
    fn submit_log(&self, payload: &LogWorkoutRequest) -> Result<LogAck, SpotterError> {
        let log_id = self
            .insert(payload)
            .map_err(|e| SpotterError::Submission(e.to_string()))?;
        info!(log_id, routine = %payload.workout_routine_id, "Workout logged");

        Ok(LogAck {
            logged_workout_id: log_id.to_string(),
            message: "Workout logged successfully".to_string(),
        })
    }
}

fn row_to_summary(row: &Row<'_>) -> Result<LogSummary, rusqlite::Error> {
    let split: String = row.get(2)?;

    Ok(LogSummary {
        id: row.get(0)?,
        routine_id: row.get(1)?,
        split: WorkoutSplit::parse(&split).unwrap_or_default(),
        started_at: row.get(3)?,
        duration_seconds: row.get(4)?,
        notes: row.get(5)?,
        exercise_count: row.get(6)?,
        set_count: row.get(7)?,
        total_volume: row.get(8)?,
    })
}

const fn split_to_string(split: WorkoutSplit) -> &'static str {
    match split {
        WorkoutSplit::FullBody => "FULL_BODY",
        WorkoutSplit::Push => "PUSH",
        WorkoutSplit::Pull => "PULL",
        WorkoutSplit::Legs => "LEGS",
        WorkoutSplit::Abs => "ABS",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{SubmittedExercise, SubmittedSet, TimerStatus};

    fn create_test_store() -> LogStore {
        LogStore::with_database(Database::open_in_memory().unwrap())
    }

    fn set(set_number: u32, weight: Option<f64>, reps: Option<u32>) -> SubmittedSet {
        SubmittedSet {
            set_number,
            weight_kg: weight,
            reps,
            rpe: Some(8.0),
            status: TimerStatus::Completed,
            elapsed_ms: 30_000,
            end_time: Some(1_000),
        }
    }

    fn payload(start: Millis, split: WorkoutSplit) -> LogWorkoutRequest {
        LogWorkoutRequest {
            workout_routine_id: format!("{}-{start}", split.slug()),
            logged_exercises: vec![
                SubmittedExercise {
                    exercise_id: "e1".to_string(),
                    name: "Bench Press".to_string(),
                    sets: vec![set(1, Some(60.0), Some(8)), set(2, Some(60.0), Some(6))],
                    status: TimerStatus::Completed,
                    start_time: Some(start),
                    elapsed_ms: 120_000,
                    active_work_ms: Some(60_000),
                },
                SubmittedExercise {
                    exercise_id: "e2".to_string(),
                    name: "Dips".to_string(),
                    sets: vec![set(1, None, Some(12))],
                    status: TimerStatus::Completed,
                    start_time: None,
                    elapsed_ms: 0,
                    active_work_ms: None,
                },
            ],
            start_time: start,
            end_time: start + 1_800_000,
            total_duration_seconds: 1_800,
            notes: Some("felt strong".to_string()),
            split,
        }
    }

    #[test]
    fn test_submit_and_get() {
        let store = create_test_store();
        let original = payload(1_000, WorkoutSplit::Push);

        let ack = store.submit_log(&original).unwrap();
        assert_eq!(ack.logged_workout_id, "1");

        let id: i64 = ack.logged_workout_id.parse().unwrap();
        let loaded = store.get(id).unwrap().unwrap();
        assert_eq!(loaded, original);
        assert!(store.get(99).unwrap().is_none());
    }

    #[test]
    fn test_recent_summaries() {
        let store = create_test_store();
        store.submit_log(&payload(1_000, WorkoutSplit::Push)).unwrap();
        store.submit_log(&payload(5_000, WorkoutSplit::FullBody)).unwrap();
        store.submit_log(&payload(3_000, WorkoutSplit::Legs)).unwrap();

        let recent = store.recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].split, WorkoutSplit::FullBody);
        assert_eq!(recent[1].split, WorkoutSplit::Legs);

        let summary = &recent[0];
        assert_eq!(summary.exercise_count, 2);
        assert_eq!(summary.set_count, 3);
        assert!((summary.total_volume - 840.0).abs() < f64::EPSILON);
        assert_eq!(summary.notes.as_deref(), Some("felt strong"));
        assert_eq!(store.recent(10).unwrap().len(), 3);
    }

    #[test]
    fn test_empty_history() {
        let store = create_test_store();
        assert!(store.recent(10).unwrap().is_empty());
        assert!(store.get(1).unwrap().is_none());
    }
}
