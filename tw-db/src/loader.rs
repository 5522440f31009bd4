//! CSV data loading functions for populating the store.
//!
//! Each loader parses CSV (with headers) from a string slice and upserts
//! rows into the corresponding table. Timestamps are normalized to
//! [`STORED_TIMESTAMP_FORMAT`]; rows whose timestamp cannot be parsed are
//! skipped and counted. Empty or non-numeric value cells become NULL.
//!
//! # CSV Formats
//!
//! - **Metrics**: `timestamp,temperature_c,humidity`
//! - **Weather**: `timestamp,temperature,humidity,wind_speed,pressure`
//! - **Surf**: `spot_name,duration_hours,weighted_sum,rank,collected_at`

use crate::{Database, STORED_TIMESTAMP_FORMAT};
use rusqlite::params;
use serde::Deserialize;
use tw_core::time::parse_timestamp;

#[derive(Debug, Deserialize)]
struct MetricCsvRow {
    timestamp: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    temperature_c: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WeatherCsvRow {
    timestamp: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    temperature: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    humidity: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    wind_speed: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pressure: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct SurfCsvRow {
    spot_name: String,
    duration_hours: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    weighted_sum: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    rank: Option<i64>,
    collected_at: String,
}

/// Parse and re-format a timestamp into the stored form.
fn stored_timestamp(raw: &str) -> Option<String> {
    parse_timestamp(raw).map(|ts| ts.format(STORED_TIMESTAMP_FORMAT).to_string())
}

fn reader(csv_data: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(csv_data.as_bytes())
}

impl Database {
    /// Load indoor metrics from CSV string.
    ///
    /// # Example CSV
    /// ```text
    /// timestamp,temperature_c,humidity
    /// 2025-01-09T14:00:00,21.5,40
    /// 2025-01-09T14:15:00,,41
    /// ```
    pub fn load_metrics(&self, csv_data: &str) -> anyhow::Result<()> {
        let mut count = 0u32;
        let mut skipped = 0u32;
        for result in reader(csv_data).deserialize() {
            let r: MetricCsvRow = result?;
            let Some(timestamp) = stored_timestamp(&r.timestamp) else {
                skipped += 1;
                continue;
            };
            self.conn.execute(
                "INSERT OR REPLACE INTO metrics (timestamp, temperature_c, humidity)
                 VALUES (?1, ?2, ?3)",
                params![timestamp, r.temperature_c, r.humidity],
            )?;
            count += 1;
        }
        log::info!("loader: Loaded {} metrics, skipped {} bad timestamps", count, skipped);
        Ok(())
    }

    /// Load outdoor weather from CSV string.
    ///
    /// # Example CSV
    /// ```text
    /// timestamp,temperature,humidity,wind_speed,pressure
    /// 2025-01-09T14:00:00,9.5,82,4.1,1016.2
    /// ```
    pub fn load_weather(&self, csv_data: &str) -> anyhow::Result<()> {
        let mut count = 0u32;
        let mut skipped = 0u32;
        for result in reader(csv_data).deserialize() {
            let r: WeatherCsvRow = result?;
            let Some(timestamp) = stored_timestamp(&r.timestamp) else {
                skipped += 1;
                continue;
            };
            self.conn.execute(
                "INSERT OR REPLACE INTO weather (timestamp, temperature, humidity, wind_speed, pressure)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![timestamp, r.temperature, r.humidity, r.wind_speed, r.pressure],
            )?;
            count += 1;
        }
        log::info!("loader: Loaded {} weather rows, skipped {} bad timestamps", count, skipped);
        Ok(())
    }

    /// Load surf forecasts from CSV string.
    ///
    /// Rows missing a score or rank, or with an unparseable run or
    /// collection timestamp, are skipped.
    ///
    /// # Example CSV
    /// ```text
    /// spot_name,duration_hours,weighted_sum,rank,collected_at
    /// Pacifica,2025-01-10T06:00:00,3.4,1,2025-01-09T05:00:00
    /// ```
    pub fn load_surf(&self, csv_data: &str) -> anyhow::Result<()> {
        let mut count = 0u32;
        let mut skipped = 0u32;
        for result in reader(csv_data).deserialize() {
            let r: SurfCsvRow = result?;
            let parsed = (
                stored_timestamp(&r.duration_hours),
                stored_timestamp(&r.collected_at),
                r.weighted_sum,
                r.rank,
            );
            let (Some(run), Some(collected), Some(score), Some(rank)) = parsed else {
                skipped += 1;
                continue;
            };
            if r.spot_name.is_empty() {
                skipped += 1;
                continue;
            }
            self.conn.execute(
                "INSERT OR REPLACE INTO surf_forecasts
                 (spot_name, duration_hours, weighted_sum, rank, collected_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![r.spot_name, run, score, rank, collected],
            )?;
            count += 1;
        }
        log::info!("loader: Loaded {} surf forecasts, skipped {} invalid", count, skipped);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;

    fn count(db: &Database, table: &str) -> i64 {
        db.conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn load_metrics_from_csv() {
        let db = Database::open_in_memory().unwrap();
        let csv = "\
timestamp,temperature_c,humidity
2025-01-09T14:00:00,21.5,40
2025-01-09T14:15:00,,41
";
        db.load_metrics(csv).unwrap();
        assert_eq!(count(&db, "metrics"), 2);

        let temp: Option<f64> = db
            .conn
            .query_row(
                "SELECT temperature_c FROM metrics WHERE timestamp = '2025-01-09T14:15:00'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(temp.is_none(), "Empty cell should be stored as NULL");
    }

    #[test]
    fn load_metrics_normalizes_timestamps() {
        let db = Database::open_in_memory().unwrap();
        let csv = "\
timestamp,temperature_c,humidity
2025-01-09 14:00,21.5,40
2025-01-09T15:00:00.250-08:00,22.0,39
";
        db.load_metrics(csv).unwrap();
        let stamps: Vec<String> = db
            .conn
            .prepare("SELECT timestamp FROM metrics ORDER BY timestamp")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(stamps, vec!["2025-01-09T14:00:00", "2025-01-09T15:00:00"]);
    }

    #[test]
    fn load_metrics_skips_bad_timestamps_but_nulls_bad_values() {
        let db = Database::open_in_memory().unwrap();
        let csv = "\
timestamp,temperature_c,humidity
not-a-time,21.5,40
2025-01-09T14:00:00,---,40
";
        db.load_metrics(csv).unwrap();
        assert_eq!(count(&db, "metrics"), 1);
    }

    #[test]
    fn load_metrics_replaces_on_conflict() {
        let db = Database::open_in_memory().unwrap();
        db.load_metrics("timestamp,temperature_c,humidity\n2025-01-09T14:00:00,20,40\n")
            .unwrap();
        db.load_metrics("timestamp,temperature_c,humidity\n2025-01-09T14:00:00,25,40\n")
            .unwrap();
        assert_eq!(count(&db, "metrics"), 1, "Should have 1 row after upsert");
        let temp: f64 = db
            .conn
            .query_row("SELECT temperature_c FROM metrics", [], |row| row.get(0))
            .unwrap();
        assert_eq!(temp, 25.0);
    }

    #[test]
    fn load_weather_from_csv() {
        let db = Database::open_in_memory().unwrap();
        let csv = "\
timestamp,temperature,humidity,wind_speed,pressure
2025-01-09T14:00:00,9.5,82,4.1,1016.2
2025-01-09T14:15:00,9.7,81,,
";
        db.load_weather(csv).unwrap();
        assert_eq!(count(&db, "weather"), 2);
    }

    #[test]
    fn load_surf_from_csv() {
        let db = Database::open_in_memory().unwrap();
        let csv = "\
spot_name,duration_hours,weighted_sum,rank,collected_at
Pacifica,2025-01-10T06:00:00,3.4,1,2025-01-09T05:00:00
Ocean Beach,2025-01-10T06:00:00,2.1,2,2025-01-09T05:00:00
Ocean Beach,2025-01-10T09:00:00,,2,2025-01-09T05:00:00
,2025-01-10T09:00:00,1.0,3,2025-01-09T05:00:00
";
        db.load_surf(csv).unwrap();
        assert_eq!(count(&db, "surf_forecasts"), 2, "Rows without score or spot are skipped");
    }
}
