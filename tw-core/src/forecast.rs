use crate::error::TidewatchError;
use crate::time::{format_hour, parse_timestamp};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A ranked surf forecast document.
///
/// `duration_hours` holds the forecast-run timestamp as an ISO 8601 string
/// and `weighted_sum` the precomputed score. Any other columns the store
/// returns are kept in `extra` so the endpoint can pass them through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfRow {
    pub spot_name: String,
    pub duration_hours: String,
    pub weighted_sum: f64,
    pub rank: i64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A surf forecast row with its run timestamp parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastEntry {
    pub spot_name: String,
    pub run_timestamp: NaiveDateTime,
    /// "HH:MM" of the run timestamp.
    pub hour_of_day: String,
    pub score: f64,
}

impl ForecastEntry {
    /// Parse a surf row. `index` is only used for error reporting.
    pub fn from_row(index: usize, row: &SurfRow) -> Result<Self, TidewatchError> {
        let run_timestamp = parse_timestamp(&row.duration_hours).ok_or_else(|| {
            TidewatchError::MalformedTimestamp {
                index,
                field: "duration_hours".to_string(),
                value: row.duration_hours.clone(),
            }
        })?;
        Ok(Self {
            spot_name: row.spot_name.clone(),
            hour_of_day: format_hour(&run_timestamp),
            run_timestamp,
            score: row.weighted_sum,
        })
    }
}
