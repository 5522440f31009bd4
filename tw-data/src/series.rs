//! Named line series for the time-series charts.

use chrono::NaiveDateTime;
use serde::Serialize;
use tw_core::Sample;

/// Which value of a sample a series plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Metric,
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePoint {
    pub x: NaiveDateTime,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub name: String,
    pub points: Vec<LinePoint>,
}

/// Build a chronologically ordered series from one channel of the samples.
///
/// Null values are skipped so they show up as gaps rather than zeros.
pub fn line_series(samples: &[Sample], channel: Channel, name: &str) -> LineSeries {
    let mut points: Vec<LinePoint> = samples
        .iter()
        .filter_map(|s| {
            let y = match channel {
                Channel::Metric => s.metric_value,
                Channel::Secondary => s.secondary_value,
            }?;
            Some(LinePoint { x: s.timestamp, y })
        })
        .collect();
    points.sort_by_key(|p| p.x);
    LineSeries {
        name: name.to_string(),
        points,
    }
}
