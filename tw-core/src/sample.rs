use crate::error::TidewatchError;
use crate::time::parse_timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A loosely typed document as returned by the snapshot endpoint.
pub type RawRecord = serde_json::Map<String, Value>;

/// Names the fields a series reads from its raw records.
///
/// Indoor metrics and outdoor weather store temperature under different
/// keys, so every series carries its own selector instead of plucking
/// arbitrary strings at the call site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesFields {
    primary: String,
    secondary: String,
    timestamp: String,
}

impl SeriesFields {
    /// Build a selector, rejecting empty names and a primary field that
    /// collides with the timestamp field.
    pub fn new(
        primary: impl Into<String>,
        secondary: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Result<Self, TidewatchError> {
        let fields = Self {
            primary: primary.into(),
            secondary: secondary.into(),
            timestamp: timestamp.into(),
        };
        if fields.primary.is_empty() || fields.secondary.is_empty() || fields.timestamp.is_empty() {
            return Err(TidewatchError::InvalidFields(
                "field names must not be empty".to_string(),
            ));
        }
        if fields.primary == fields.timestamp || fields.secondary == fields.timestamp {
            return Err(TidewatchError::InvalidFields(format!(
                "value fields must differ from the timestamp field '{}'",
                fields.timestamp
            )));
        }
        Ok(fields)
    }

    /// Indoor sensor metrics: `temperature_c` / `humidity` / `timestamp`.
    pub fn indoor() -> Self {
        Self {
            primary: "temperature_c".to_string(),
            secondary: "humidity".to_string(),
            timestamp: "timestamp".to_string(),
        }
    }

    /// Outdoor weather: `temperature` / `humidity` / `timestamp`.
    pub fn outdoor() -> Self {
        Self {
            primary: "temperature".to_string(),
            secondary: "humidity".to_string(),
            timestamp: "timestamp".to_string(),
        }
    }

    pub fn primary(&self) -> &str {
        &self.primary
    }

    pub fn secondary(&self) -> &str {
        &self.secondary
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

/// One normalized time-stamped observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub timestamp: NaiveDateTime,
    /// Primary value (e.g. temperature). `None` when absent or null.
    pub metric_value: Option<f64>,
    /// Secondary value (e.g. humidity). `None` when absent or null.
    pub secondary_value: Option<f64>,
}

impl Sample {
    /// Normalize a single raw record. `index` is only used for error reporting.
    pub fn from_record(
        index: usize,
        record: &RawRecord,
        fields: &SeriesFields,
    ) -> Result<Self, TidewatchError> {
        let raw_ts = record.get(fields.timestamp());
        let timestamp = raw_ts
            .and_then(Value::as_str)
            .and_then(parse_timestamp)
            .ok_or_else(|| TidewatchError::MalformedTimestamp {
                index,
                field: fields.timestamp().to_string(),
                value: raw_ts.map(Value::to_string).unwrap_or_else(|| "<missing>".to_string()),
            })?;

        Ok(Self {
            timestamp,
            metric_value: record.get(fields.primary()).and_then(Value::as_f64),
            secondary_value: record.get(fields.secondary()).and_then(Value::as_f64),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("test record must be an object"),
        }
    }

    #[test]
    fn presets_are_valid() {
        let indoor = SeriesFields::indoor();
        assert_eq!(indoor.primary(), "temperature_c");
        let rebuilt = SeriesFields::new(indoor.primary(), indoor.secondary(), indoor.timestamp());
        assert_eq!(rebuilt, Ok(indoor));
        assert_eq!(SeriesFields::outdoor().primary(), "temperature");
    }

    #[test]
    fn rejects_empty_and_colliding_fields() {
        assert!(SeriesFields::new("", "humidity", "timestamp").is_err());
        assert!(SeriesFields::new("temperature", "humidity", "").is_err());
        assert!(SeriesFields::new("timestamp", "humidity", "timestamp").is_err());
    }

    #[test]
    fn from_record_copies_values() {
        let r = record(json!({
            "temperature_c": 21.5,
            "humidity": 40,
            "timestamp": "2025-01-09T14:00:00"
        }));
        let s = Sample::from_record(0, &r, &SeriesFields::indoor()).unwrap();
        assert_eq!(s.metric_value, Some(21.5));
        assert_eq!(s.secondary_value, Some(40.0));
    }

    #[test]
    fn from_record_null_and_missing_values_are_none() {
        let r = record(json!({ "temperature_c": null, "timestamp": "2025-01-09T14:00:00" }));
        let s = Sample::from_record(0, &r, &SeriesFields::indoor()).unwrap();
        assert_eq!(s.metric_value, None);
        assert_eq!(s.secondary_value, None);
    }

    #[test]
    fn from_record_missing_timestamp_fails() {
        let r = record(json!({ "temperature_c": 20.0 }));
        let err = Sample::from_record(7, &r, &SeriesFields::indoor()).unwrap_err();
        assert_eq!(
            err,
            TidewatchError::MalformedTimestamp {
                index: 7,
                field: "timestamp".to_string(),
                value: "<missing>".to_string(),
            }
        );
    }

    #[test]
    fn from_record_unparseable_timestamp_fails() {
        let r = record(json!({ "temperature_c": 20.0, "timestamp": "tuesday" }));
        assert!(matches!(
            Sample::from_record(0, &r, &SeriesFields::indoor()),
            Err(TidewatchError::MalformedTimestamp { .. })
        ));

        let numeric = record(json!({ "temperature_c": 20.0, "timestamp": 1736431200 }));
        assert!(Sample::from_record(0, &numeric, &SeriesFields::indoor()).is_err());
    }
}
