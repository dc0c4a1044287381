//! `SQLite` database holding finished workouts.
//!
//! Lives at `~/.spotter/spotter.db`. Every CLI invocation opens its own
//! connection, so a busy timeout lets a `finish` wait out a concurrent
//! `history` read instead of failing.

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

use crate::config::Paths;
use crate::error::SpotterError;

use super::migrations;

const BUSY_TIMEOUT: Duration = Duration::from_secs(2);

/// Migrated connection to the workout history.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the history database under the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, the file cannot
    /// be opened or the schema cannot be migrated.
    pub fn open() -> Result<Self, SpotterError> {
        let paths = Paths::new()?;
        paths.ensure_dirs()?;
        Self::open_at(&paths.database)
    }

    /// Open the history database at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, SpotterError> {
        let conn = Connection::open(path).map_err(|e| {
            SpotterError::Database(format!("Failed to open {}: {e}", path.display()))
        })?;
        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(|e| SpotterError::Database(format!("Failed to set busy timeout: {e}")))?;
        Self::prepare(conn)
    }

    /// Open a throwaway in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub fn open_in_memory() -> Result<Self, SpotterError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| SpotterError::Database(format!("Failed to open memory database: {e}")))?;
        Self::prepare(conn)
    }

    fn prepare(conn: Connection) -> Result<Self, SpotterError> {
        // Sets cascade with their workout
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| SpotterError::Database(format!("Failed to enable foreign keys: {e}")))?;

        migrations::run(&conn)?;
        Ok(Self { conn })
    }

    /// Schema version recorded in the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, SpotterError> {
        migrations::get_version(&self.conn)
    }

    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}
