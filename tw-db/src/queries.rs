//! Snapshot queries.
//!
//! Rows come back as JSON documents keyed by column name, the same shape
//! the dashboard would get from a document store. Metrics and weather are
//! bounded by a lookback window measured back from each table's newest
//! row, so a sensor that stopped reporting still shows its last readings.

use crate::{Database, STORED_TIMESTAMP_FORMAT};
use chrono::{NaiveDateTime, TimeDelta};
use rusqlite::types::ValueRef;
use rusqlite::{params, Params, Row};
use serde_json::{Number, Value};
use tw_core::{RawRecord, Snapshot, SurfRow};

/// Convert one SQLite row into a JSON document keyed by column name.
fn row_to_document(row: &Row<'_>, columns: &[String]) -> rusqlite::Result<RawRecord> {
    let mut doc = RawRecord::new();
    for (i, name) in columns.iter().enumerate() {
        let value = match row.get_ref(i)? {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(n) => Value::from(n),
            ValueRef::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
            ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
            // no blob columns in the schema
            ValueRef::Blob(_) => Value::Null,
        };
        doc.insert(name.clone(), value);
    }
    Ok(doc)
}

impl Database {
    fn query_documents<P: Params>(&self, sql: &str, params: P) -> anyhow::Result<Vec<RawRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let rows = stmt
            .query_map(params, |row| row_to_document(row, &columns))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Earliest timestamp inside the lookback window of `table`, or `None`
    /// if the table is empty.
    fn lookback_cutoff(&self, table: &str, lookback_hours: i64) -> anyhow::Result<Option<String>> {
        let newest: Option<String> = self.conn.query_row(
            &format!("SELECT MAX(timestamp) FROM {}", table),
            [],
            |row| row.get(0),
        )?;
        let Some(newest) = newest else {
            return Ok(None);
        };
        let newest = NaiveDateTime::parse_from_str(&newest, STORED_TIMESTAMP_FORMAT)?;
        let window = TimeDelta::try_hours(lookback_hours)
            .ok_or_else(|| anyhow::anyhow!("lookback of {} hours is out of range", lookback_hours))?;
        let cutoff = newest.checked_sub_signed(window).ok_or_else(|| {
            anyhow::anyhow!("lookback of {} hours reaches past the earliest representable date", lookback_hours)
        })?;
        Ok(Some(cutoff.format(STORED_TIMESTAMP_FORMAT).to_string()))
    }

    fn query_recent(&self, table: &str, lookback_hours: i64) -> anyhow::Result<Vec<RawRecord>> {
        let Some(cutoff) = self.lookback_cutoff(table, lookback_hours)? else {
            return Ok(Vec::new());
        };
        let rows = self.query_documents(
            &format!(
                "SELECT * FROM {} WHERE timestamp >= ?1 ORDER BY timestamp",
                table
            ),
            params![cutoff],
        )?;
        log::info!(
            "query: {} returned {} records since {}",
            table,
            rows.len(),
            cutoff
        );
        Ok(rows)
    }

    /// Indoor metrics within `lookback_hours` of the newest reading.
    pub fn query_metrics(&self, lookback_hours: i64) -> anyhow::Result<Vec<RawRecord>> {
        self.query_recent("metrics", lookback_hours)
    }

    /// Outdoor weather within `lookback_hours` of the newest reading.
    pub fn query_weather(&self, lookback_hours: i64) -> anyhow::Result<Vec<RawRecord>> {
        self.query_recent("weather", lookback_hours)
    }

    /// All ranked surf rows from the most recent collection, ordered by
    /// run timestamp then rank. Rank filtering is left to the dashboard.
    pub fn query_surf(&self) -> anyhow::Result<Vec<SurfRow>> {
        let docs = self.query_documents(
            "SELECT spot_name, duration_hours, weighted_sum, rank, collected_at
             FROM surf_forecasts
             WHERE collected_at = (SELECT MAX(collected_at) FROM surf_forecasts)
             ORDER BY duration_hours, rank",
            [],
        )?;
        let rows = docs
            .into_iter()
            .map(|doc| serde_json::from_value(Value::Object(doc)))
            .collect::<Result<Vec<SurfRow>, _>>()?;
        log::info!("query: surf_forecasts returned {} records", rows.len());
        Ok(rows)
    }

    /// Everything the dashboard needs in one document.
    pub fn query_snapshot(&self, lookback_hours: i64) -> anyhow::Result<Snapshot> {
        Ok(Snapshot {
            metrics: self.query_metrics(lookback_hours)?,
            weather: self.query_weather(lookback_hours)?,
            surf: self.query_surf()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;
    use serde_json::json;

    /// Helper to create a database with two days of readings and two surf collections.
    fn sample_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.load_metrics(
            "\
timestamp,temperature_c,humidity
2025-01-07T14:00:00,18.0,45
2025-01-08T14:00:00,16.0,50
2025-01-09T13:45:00,19.0,42
2025-01-09T14:00:00,20.0,
",
        )
        .unwrap();
        db.load_weather(
            "\
timestamp,temperature,humidity,wind_speed,pressure
2025-01-08T14:00:00,7.0,85,3.0,1012.0
2025-01-09T14:00:00,9.0,80,,1014.5
",
        )
        .unwrap();
        db.load_surf(
            "\
spot_name,duration_hours,weighted_sum,rank,collected_at
Pacifica,2025-01-09T06:00:00,1.0,1,2025-01-08T05:00:00
Pacifica,2025-01-10T06:00:00,3.4,1,2025-01-09T05:00:00
Ocean Beach,2025-01-10T06:00:00,2.1,2,2025-01-09T05:00:00
Ocean Beach,2025-01-11T09:00:00,2.8,6,2025-01-09T05:00:00
",
        )
        .unwrap();
        db
    }

    #[test]
    fn query_metrics_respects_lookback() {
        let db = sample_db();
        let rows = db.query_metrics(24).unwrap();
        // 2025-01-07 is more than 24 hours before the newest reading
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["timestamp"], json!("2025-01-08T14:00:00"));

        let all = db.query_metrics(72).unwrap();
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn lookback_past_calendar_range_is_an_error() {
        let db = sample_db();
        let err = db.query_snapshot(10_000_000_000).unwrap_err();
        assert!(err.to_string().contains("earliest representable date"));
        // i64::MAX hours does not even fit a TimeDelta
        assert!(db.query_metrics(i64::MAX).is_err());
    }

    #[test]
    fn query_metrics_documents_keep_nulls() {
        let db = sample_db();
        let rows = db.query_metrics(24).unwrap();
        let newest = rows.last().unwrap();
        assert_eq!(newest["temperature_c"], json!(20.0));
        assert_eq!(newest["humidity"], json!(null));
    }

    #[test]
    fn query_weather_returns_every_column() {
        let db = sample_db();
        let rows = db.query_weather(48).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["pressure"], json!(1014.5));
        assert!(rows[1].contains_key("wind_speed"));
    }

    #[test]
    fn query_surf_returns_latest_collection_only() {
        let db = sample_db();
        let rows = db.query_surf().unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.extra["collected_at"] == json!("2025-01-09T05:00:00")));
        // ordered by run timestamp then rank
        assert_eq!(rows[0].spot_name, "Pacifica");
        assert_eq!(rows[2].rank, 6);
    }

    #[test]
    fn empty_tables_give_empty_snapshot() {
        let db = Database::open_in_memory().unwrap();
        let snapshot = db.query_snapshot(48).unwrap();
        assert_eq!(snapshot, tw_core::Snapshot::default());
    }

    #[test]
    fn snapshot_round_trips_through_the_dashboard_shape() {
        let db = sample_db();
        let snapshot = db.query_snapshot(24).unwrap();
        let body = serde_json::to_string(&snapshot).unwrap();
        let decoded = tw_core::Snapshot::from_json(&body).unwrap();
        assert_eq!(decoded, snapshot);
        assert_eq!(decoded.metrics.len(), 3);
    }
}
