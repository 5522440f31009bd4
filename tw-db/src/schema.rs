//! SQL schema definitions for the store.
//!
//! The schema is applied as a single batch every time a connection opens.

/// Returns the full SQL schema as a single batch string.
///
/// This creates the following tables:
///
/// - `metrics` - indoor readings (timestamp, temperature in °C, humidity)
/// - `weather` - outdoor readings (timestamp, temperature, humidity, wind speed, pressure)
/// - `surf_forecasts` - forecast rows (spot, run timestamp, weighted score, rank, collection time)
///
/// Value columns are nullable: a sensor that misses a reading stores NULL,
/// which the dashboard keeps out of its averages.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS metrics (
        timestamp TEXT PRIMARY KEY,
        temperature_c REAL,
        humidity REAL
    );

    CREATE TABLE IF NOT EXISTS weather (
        timestamp TEXT PRIMARY KEY,
        temperature REAL,
        humidity REAL,
        wind_speed REAL,
        pressure REAL
    );

    CREATE TABLE IF NOT EXISTS surf_forecasts (
        spot_name TEXT NOT NULL,
        duration_hours TEXT NOT NULL,
        weighted_sum REAL NOT NULL,
        rank INTEGER NOT NULL,
        collected_at TEXT NOT NULL,
        PRIMARY KEY (spot_name, duration_hours, collected_at)
    );
    CREATE INDEX IF NOT EXISTS idx_surf_collected ON surf_forecasts(collected_at);
    "#
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn schema_is_valid_sql() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema())
            .expect("Schema SQL should be valid");
    }

    #[test]
    fn schema_creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();

        for table in &["metrics", "weather", "surf_forecasts"] {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "Table '{}' should exist", table);
        }
    }

    #[test]
    fn schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();
        conn.execute_batch(create_schema())
            .expect("Applying schema twice should succeed due to IF NOT EXISTS");
    }
}
