//! SQLite store for the Tidewatch dashboard.
//!
//! Holds the three document collections the dashboard reads: indoor sensor
//! metrics, outdoor weather, and ranked surf forecasts. Queries return rows
//! as loosely typed JSON documents so the snapshot endpoint can serve them
//! unchanged.
//!
//! # Connection lifetime
//!
//! A [`Database`] owns its connection outright. Callers open one per request
//! and let it drop when the request finishes; there is no process-wide
//! handle. The connection closes on every exit path, including `?` returns.
//!
//! # Usage
//!
//! ```rust
//! use tw_db::Database;
//!
//! let db = Database::open_in_memory().unwrap();
//! db.load_metrics("timestamp,temperature_c,humidity\n2025-01-09T14:00:00,21.5,40\n").unwrap();
//!
//! let snapshot = db.query_snapshot(48).unwrap();
//! assert_eq!(snapshot.metrics.len(), 1);
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema.
//! - `metrics` - indoor temperature (°C) and relative humidity
//! - `weather` - outdoor temperature, humidity, wind and pressure
//! - `surf_forecasts` - per-spot forecast runs with a weighted score and rank

pub mod schema;
mod loader;
mod queries;

use rusqlite::Connection;
use std::path::Path;

/// Timestamp format every stored timestamp is normalized to on load.
///
/// Fixed-width ISO text sorts chronologically, so range filters can compare
/// strings directly in SQL.
pub const STORED_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A single SQLite connection with the schema applied.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database file at `path` and apply the schema.
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        conn.execute_batch(schema::create_schema())?;
        log::debug!("db: opened {}", path.as_ref().display());
        Ok(Self { conn })
    }

    /// Create a new in-memory database with the full schema applied.
    pub fn open_in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self { conn })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_creates_successfully() {
        let db = Database::open_in_memory();
        assert!(db.is_ok(), "Database should create without errors");
    }

    #[test]
    fn database_starts_empty() {
        let db = Database::open_in_memory().unwrap();
        let snapshot = db.query_snapshot(48).unwrap();
        assert!(snapshot.metrics.is_empty());
        assert!(snapshot.weather.is_empty());
        assert!(snapshot.surf.is_empty());
    }

    #[test]
    fn file_database_persists_between_connections() {
        let dir = std::env::temp_dir().join(format!("tw-db-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("persist.db");
        let _ = std::fs::remove_file(&path);

        {
            let db = Database::open(&path).unwrap();
            db.load_metrics("timestamp,temperature_c,humidity\n2025-01-09T14:00:00,21.5,40\n")
                .unwrap();
        }
        let reopened = Database::open(&path).unwrap();
        assert_eq!(reopened.query_snapshot(48).unwrap().metrics.len(), 1);

        drop(reopened);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
